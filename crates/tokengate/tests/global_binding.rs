//! Process-wide configuration binding.
//!
//! Lives in its own test binary: the binding is per-process state, and the
//! ordering here (unbound first, then bound) must not race with other tests.

use tokengate::{AuthConfig, AuthError, Authenticator, RequireAuthLayer};

#[test]
fn guard_construction_fails_fast_until_a_config_is_bound() {
    // Nothing bound yet: construction errors immediately, not at first
    // request.
    assert!(matches!(
        Authenticator::from_bound(),
        Err(AuthError::ConfigurationUnbound)
    ));
    assert!(matches!(
        RequireAuthLayer::from_bound(),
        Err(AuthError::ConfigurationUnbound)
    ));

    AuthConfig::new("client-id", "client-secret").bind_global();

    assert!(Authenticator::from_bound().is_ok());
    assert!(RequireAuthLayer::from_bound().is_ok());

    // Rebinding is ignored; the first binding stays authoritative.
    AuthConfig::new("other-id", "other-secret").bind_global();
    assert_eq!(AuthConfig::bound().unwrap().client_id, "client-id");
}
