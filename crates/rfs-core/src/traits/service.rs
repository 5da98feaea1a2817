//! Service marker trait.

/// Marker trait for business logic services.
///
/// Every service in `rfs-service` implements this trait so the API state
/// can hold them uniformly behind `Arc`.
pub trait Service: Send + Sync + 'static {}
