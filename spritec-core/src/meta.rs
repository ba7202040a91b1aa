/// Crate version, for display only. Rendering output does not depend on it.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
