//! Version output

/// The line printed by `--version`
pub fn version_line() -> String {
    format!("kubectl-tree version {}", env!("CARGO_PKG_VERSION"))
}

/// Display version information
pub fn display_version() {
    println!("{}", version_line());
}
