use colored::Colorize;

const BANNER: &str = r"
   _____ _____  _   _ ____  _____ ____ _  __
  | ____|  _  \| | | |  _ \| ____/ ___| |/ /
  |  _| | | | || | | | | | |  _|| |   | ' /
  | |___| |_| || |_| | |_| | |__| |___| . \
  |_____|_____/ \___/|____/|_____\____|_|\_\
";

pub fn print_banner_with_version() {
    println!("{}", BANNER.trim_start_matches('\n').bright_blue().bold());
    println!(
        "  {} {}",
        "edudeck".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).green()
    );
    println!(
        "  {}",
        "Educación Superior · Región de Magallanes · 2021".dimmed()
    );
}
