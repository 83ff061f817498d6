/// Read-only state shared with every handler.
#[derive(Clone)]
pub struct AppState {
    /// Redirect target, exactly as configured.
    pub redirect: String,
}
