use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("doclens")
        .version("0.1.0")
        .author("Doclens Contributors")
        .about("Audit documentation pages with LLM-backed quality scoring")
        .arg(clap::arg!(<URL> "Documentation URL to analyze"))
        .arg(clap::arg!(-r --revise "Also generate a revised version of the page content"))
        .arg(
            clap::arg!(-o --output_dir <DIR> "Directory for result snapshots")
                .default_value("output")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--prompts_dir <DIR> "Directory holding the prompt templates")
                .default_value("prompts")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--model <MODEL> "Model identifier"))
        .arg(clap::arg!(--timeout <SECS> "Model request timeout in seconds").default_value("120"))
        .arg(
            clap::arg!(--settle_delay <SECS> "Fixed wait after navigation for client-side rendering")
                .default_value("15"),
        )
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent presented to the target site").value_name("UA"))
        .arg(clap::arg!(--no_save "Skip writing result files"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "doclens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "doclens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "doclens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "doclens", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
