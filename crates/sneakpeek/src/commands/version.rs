use colored::Colorize;

pub fn run() {
    println!(
        "{} {}",
        "sneakpeek".bold(),
        env!("CARGO_PKG_VERSION").cyan()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION").dimmed());
}
