use axum::Router;

/// A service module that contributes HTTP routes.
///
/// Each business module (pokemon, seed) implements this trait to register
/// its endpoints. The binary collects all modules and nests their routes
/// under the API prefix.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes, already bound to their state.
    fn routes(&self) -> Router;
}
