//! Policy gate around guarded operations.

use std::fmt;

use authkit_security::{Client, Policy};
use tracing::{Level, debug};

use crate::error::AuthZResolverError;

/// Run `op` if `client` satisfies `spec`.
///
/// The operation's value is returned unchanged. On denial `op` is never
/// called.
///
/// # Errors
///
/// `PermissionDenied { resource_name }` if `client` does not satisfy `spec`.
pub fn authorize<T>(
    spec: &Policy,
    client: &Client,
    resource_name: &str,
    op: impl FnOnce() -> T,
) -> Result<T, AuthZResolverError> {
    check(spec, client, resource_name)?;
    Ok(op())
}

fn check(spec: &Policy, client: &Client, resource_name: &str) -> Result<(), AuthZResolverError> {
    if spec.is_satisfied_by(client) {
        return Ok(());
    }

    // Remainder is computed only when the denial is actually logged.
    if tracing::enabled!(Level::DEBUG)
        && let Some(remainder) = spec.remainder_unsatisfied_by(client)
    {
        debug!(
            resource = resource_name,
            login = client.login(),
            unsatisfied = %remainder,
            "Permission denied"
        );
    }
    Err(AuthZResolverError::PermissionDenied {
        resource_name: resource_name.to_owned(),
    })
}

/// A policy bound to the name of the resource it protects.
///
/// Built once when routes or services are defined, then shared by every call.
#[derive(Clone)]
pub struct Gate {
    resource_name: String,
    spec: Policy,
}

impl Gate {
    #[must_use]
    pub fn new(resource_name: impl Into<String>, spec: impl Into<Policy>) -> Self {
        Self {
            resource_name: resource_name.into(),
            spec: spec.into(),
        }
    }

    #[must_use]
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    #[must_use]
    pub fn spec(&self) -> &Policy {
        &self.spec
    }

    /// # Errors
    ///
    /// `PermissionDenied` if `client` does not satisfy the policy.
    pub fn check(&self, client: &Client) -> Result<(), AuthZResolverError> {
        check(&self.spec, client, &self.resource_name)
    }

    /// Run `op` if `client` satisfies the policy; see [`authorize`].
    ///
    /// # Errors
    ///
    /// `PermissionDenied` if `client` does not satisfy the policy.
    pub fn run<T>(&self, client: &Client, op: impl FnOnce() -> T) -> Result<T, AuthZResolverError> {
        authorize(&self.spec, client, &self.resource_name, op)
    }

    /// The part of the policy `client` fails, `None` when access is granted.
    #[must_use]
    pub fn explain(&self, client: &Client) -> Option<Policy> {
        self.spec.remainder_unsatisfied_by(client)
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("resource_name", &self.resource_name)
            .field("spec", &format_args!("{}", self.spec))
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use authkit_security::{AppGroups, Group, Permission};
    use tracing::subscriber::NoSubscriber;
    use tracing_test::traced_test;

    use super::*;

    fn app_groups() -> AppGroups {
        Arc::from(vec![
            Group::new("admins").with_permissions([Permission::new("edit"), Permission::new("delete")]),
            Group::new("editors").with_permissions([Permission::new("edit")]),
        ])
    }

    fn client(groups: &[&str]) -> Client {
        Client::builder()
            .user_id(1)
            .login("jdoe")
            .name("John Doe")
            .groups(groups.iter().copied())
            .app_groups(app_groups())
            .build()
            .unwrap()
    }

    fn delete() -> Policy {
        Permission::new("delete").into()
    }

    #[test]
    fn authorize_returns_operation_value() {
        let value = authorize(&delete(), &client(&["admins"]), "Orders.delete", || 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn denied_operation_is_never_invoked() {
        let calls = Cell::new(0);

        let err = authorize(&delete(), &client(&["editors"]), "Orders.delete", || {
            calls.set(calls.get() + 1);
        })
        .unwrap_err();

        assert_eq!(
            err,
            AuthZResolverError::PermissionDenied {
                resource_name: "Orders.delete".to_owned()
            }
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn operation_errors_pass_through() {
        let res: Result<Result<(), &str>, _> =
            authorize(&delete(), &client(&["admins"]), "r", || Err("boom"));
        assert_eq!(res.unwrap(), Err("boom"));
    }

    #[test]
    fn denial_stops_at_first_failing_child() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counted = Policy::from_fn("counted", move |_: &Client| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });
        let gate = Gate::new("Orders.delete", delete().and(counted));

        let res = tracing::subscriber::with_default(NoSubscriber::default(), || {
            gate.check(&client(&["editors"]))
        });

        assert!(res.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn gate_is_reusable_across_clients() {
        let gate = Gate::new(
            "Articles.publish",
            Policy::from(Permission::new("edit")).and(Group::new("admins").into()),
        );

        assert!(gate.check(&client(&["admins"])).is_ok());
        assert!(gate.check(&client(&["editors"])).is_err());
        assert_eq!(gate.run(&client(&["admins"]), || "ok").unwrap(), "ok");
        assert_eq!(gate.resource_name(), "Articles.publish");
    }

    #[test]
    fn explain_names_failing_part() {
        let gate = Gate::new(
            "r",
            Policy::from(Permission::new("edit")).and(Permission::new("delete").into()),
        );

        assert!(gate.explain(&client(&["admins"])).is_none());
        let remainder = gate.explain(&client(&["editors"])).unwrap();
        assert_eq!(remainder.to_string(), "perm:delete");
    }

    #[test]
    #[traced_test]
    fn denial_is_logged_with_remainder() {
        let gate = Gate::new("Orders.delete", delete());
        assert!(gate.check(&client(&[])).is_err());

        assert!(logs_contain("Permission denied"));
        assert!(logs_contain("perm:delete"));
    }
}
