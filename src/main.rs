use colored::Colorize;

fn main() {
    match redis_edit::run() {
        Ok(outcome) => eprintln!("{}", redis_edit::describe_outcome(&outcome)),
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red().bold(), err);
            if err.store_untouched() {
                eprintln!("  {}", "the key was left unchanged".dimmed());
            }
            std::process::exit(1);
        }
    }
}
