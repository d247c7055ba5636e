use std::{path::PathBuf, process::ExitCode};

use desktop_server::{
    auth::{hash_password, verify_password},
    config::ServerConfig,
    seed::{seed, DEFAULT_SEED_PASSWORD},
    store::Repository,
};
use log::{error, info};

const SEED_PASSWORD_ENV: &str = "DESKTOP_SEED_PASSWORD";

fn print_usage() {
    eprintln!(
        "usage: desktop_server [--config <path>] <command>\n\n\
         commands:\n  \
         serve                       run the HTTP server (default)\n  \
         seed                        insert default apps, wallpaper and lock password\n  \
         hash-password <password>    print a stored hash for <password>\n  \
         verify-hash <password>      check <password> against the stored lock password\n  \
         help                        show this message\n\n\
         The seed password is read from {SEED_PASSWORD_ENV} (default {DEFAULT_SEED_PASSWORD})."
    );
}

fn load_config(path: Option<PathBuf>) -> Result<ServerConfig, String> {
    ServerConfig::load(path.as_deref()).map_err(|err| err.to_string())
}

fn run_serve(config: ServerConfig) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("failed to start runtime: {err}"))?;
    runtime
        .block_on(desktop_server::serve(config))
        .map_err(|err| err.to_string())
}

fn run_seed(config: &ServerConfig) -> Result<(), String> {
    let repo = Repository::open(&config.data_file).map_err(|err| err.to_string())?;
    let password = std::env::var(SEED_PASSWORD_ENV)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_SEED_PASSWORD.to_string());
    let report = seed(&repo, &password).map_err(|err| err.to_string())?;
    info!(
        "seeded {}: {} apps created, lock password and wallpaper set",
        config.data_file.display(),
        report.apps_created
    );
    Ok(())
}

fn run_verify_hash(config: &ServerConfig, password: &str) -> Result<(), String> {
    let repo = Repository::open(&config.data_file).map_err(|err| err.to_string())?;
    let stored = repo
        .get_config(platform_host::LOCK_PASSWORD_KEY)
        .map_err(|err| err.to_string())?
        .ok_or("no lock password stored; run `seed` first")?;
    if verify_password(password, &stored) {
        println!("match");
        Ok(())
    } else {
        Err("password does not match".to_string())
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1).peekable();
    let mut config_path = None;
    if args.peek().map(String::as_str) == Some("--config") {
        args.next();
        let Some(path) = args.next() else {
            print_usage();
            return ExitCode::from(2);
        };
        config_path = Some(PathBuf::from(path));
    }
    let cmd = args.next().unwrap_or_else(|| "serve".to_string());
    let rest: Vec<String> = args.collect();

    let result = match cmd.as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "hash-password" => match rest.first() {
            Some(password) => hash_password(password)
                .map(|hash| println!("{hash}"))
                .map_err(|err| err.to_string()),
            None => Err("hash-password requires <password>".to_string()),
        },
        "serve" => load_config(config_path).and_then(run_serve),
        "seed" => load_config(config_path).and_then(|config| run_seed(&config)),
        "verify-hash" => match rest.first() {
            Some(password) => {
                load_config(config_path).and_then(|config| run_verify_hash(&config, password))
            }
            None => Err("verify-hash requires <password>".to_string()),
        },
        other => {
            eprintln!("unknown command: {other}\n");
            print_usage();
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{cmd} failed: {err}");
            ExitCode::FAILURE
        }
    }
}
