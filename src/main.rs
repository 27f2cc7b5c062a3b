use anyhow::{Context as _, Result};
use argh::FromArgs;
use powerprompt::{Environment, IconMode, Shell, config::Config};
use std::{fs, io::Write as _, path::PathBuf, process::ExitCode};

#[derive(FromArgs)]
/// powerprompt
struct Arguments {
    #[argh(subcommand)]
    /// action
    command: Option<Command>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Run(Run),
    Init(Init),
}

#[derive(FromArgs)]
#[argh(subcommand, name = "init")]
/// print the prompt hook for a shell
struct Init {
    #[argh(positional)]
    /// bash or zsh
    shell: Shell,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
/// print the prompt
struct Run {
    #[argh(positional)]
    /// exit status of the previous command, after `--` when negative
    prev_error: Option<i32>,

    #[argh(option)]
    /// prompt escaping: bash, zsh or bare
    shell: Option<Shell>,

    #[argh(option)]
    /// glyph set: compatible, patched or flat
    mode: Option<IconMode>,

    #[argh(option)]
    /// elide the middle of paths deeper than this
    cwd_max_depth: Option<usize>,

    #[argh(switch)]
    /// only show the current directory
    cwd_only: bool,

    #[argh(switch)]
    /// color the host name by its hash
    colorize_hostname: bool,

    #[argh(option)]
    /// config file to use
    config: Option<PathBuf>,
}

fn exec_path() -> String {
    fs::read_link("/proc/self/exe")
        .or_else(|_| std::env::current_exe())
        .map(|pb| String::from(pb.to_string_lossy()))
        .unwrap_or("powerprompt".to_owned())
}

fn hook(shell: Shell, exec: &str) -> Result<String> {
    let script = match shell {
        Shell::Bash => include_str!("init/bash.sh"),
        Shell::Zsh => include_str!("init/zsh.sh"),
        Shell::Bare => anyhow::bail!("`bare` has no prompt hook, use bash or zsh"),
    };
    Ok(script.replace("<exec>", exec))
}

fn init(Init { shell }: Init) -> Result<()> {
    println!("{}", hook(shell, &exec_path())?);
    Ok(())
}

fn run(run: Run) -> Result<()> {
    let config_path = match run.config {
        Some(path) => path,
        None => Config::default_path().context("cannot determine config directory")?,
    };
    let config = Config::load(&config_path)?;
    let theme = config.load_theme(&config_path)?;

    let shell = run.shell.or(config.shell).unwrap_or_default();
    let mode = run.mode.or(config.mode).unwrap_or_default();
    let mut env = Environment::detect(shell, mode, run.prev_error.unwrap_or(0))?;
    env.cwd_max_depth = run
        .cwd_max_depth
        .or(config.cwd_max_depth)
        .unwrap_or(Environment::DEFAULT_CWD_MAX_DEPTH);
    env.cwd_only = run.cwd_only || config.cwd_only;
    env.colorize_hostname = run.colorize_hostname || config.colorize_hostname;

    let prompt = powerprompt::build(&env, theme, &config.segments)?.render()?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("POWERPROMPT_LOG", "warn"))
        .init();

    let args: Arguments = argh::from_env();
    let Some(command) = args.command else {
        let ver = env!("CARGO_PKG_VERSION");
        let exec = exec_path();
        println!("[powerprompt {ver}] --- powerline-style shell prompt, written in Rust");
        println!("Use `--help` to see advanced usage");
        println!("Simple install:");
        println!("    echo 'eval \"$(\"{exec}\" init bash)\"' >> ~/.bashrc");
        println!("    mkdir -p ~/.config/powerprompt && cp -r share/* ~/.config/powerprompt/");
        return ExitCode::SUCCESS;
    };

    let result = match command {
        Command::Init(args) => init(args),
        Command::Run(args) => run(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("powerprompt: {err:#}");
            ExitCode::FAILURE
        }
    }
}
