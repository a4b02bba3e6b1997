use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("copymill")
        .version("0.5.0")
        .author("Copymill Contributors")
        .about("Repurpose articles into marketing-copy variants")
        .arg(clap::arg!([INPUT] "URL to fetch, file of pasted source text, or '-' for stdin"))
        .arg(
            clap::arg!(-F --formats <IDS> "Output formats, comma-separated ids")
                .value_name("IDS")
                .default_value("social-short"),
        )
        .arg(clap::arg!(--campaign "Produce the structured four-asset campaign JSON"))
        .arg(clap::arg!(--chat "Start an interactive chat session"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--save_dir <DIR> "Directory to export plain-text artifacts into")
                .value_name("DIR")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--demo "Force demo mode even when a credential is configured"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds for article fetches").default_value("10"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for article fetches").value_name("UA"))
        .arg(clap::arg!(--model <MODEL> "Model identifier for generation requests").value_name("MODEL"))
        .arg(clap::arg!(--max_tokens <NUM> "Maximum output tokens per generation").value_name("NUM"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "copymill", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "copymill", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "copymill", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "copymill", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
