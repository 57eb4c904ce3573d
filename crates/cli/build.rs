use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("letterbox")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Letterbox Contributors")
        .about("Split newsletter emails into essays and links")
        .arg(clap::arg!([INPUT] "HTML email body file, or '-' for stdin").default_value("-"))
        .arg(clap::arg!(--name <NAME> "Newsletter display name"))
        .arg(clap::arg!(--email <EMAIL> "Sender email address"))
        .arg(clap::arg!(--timestamp <TIMESTAMP> "Time the email was received (ISO-8601)"))
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (json, text)")
                .value_name("FORMAT")
                .default_value("json")
                .value_parser(["json", "text"]),
        )
        .arg(clap::arg!(--pretty "Pretty-print JSON output"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--config <FILE> "Config file (default: the user config, when present)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::Arg::new("min-words")
                .long("min-words")
                .value_name("NUM")
                .help("Minimum word count for an article to be kept"),
        )
        .arg(
            clap::Arg::new("essay-source")
                .long("essay-source")
                .value_name("NAME")
                .action(clap::ArgAction::Append)
                .help("Treat newsletters whose name contains NAME as essay sources (repeatable)"),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_name("SHELL")
                .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "letterbox", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "letterbox", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "letterbox", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "letterbox", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
