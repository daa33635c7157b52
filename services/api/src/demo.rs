use clap::Args;
use realty_console::auth::domain::{Principal, PrincipalId, Role};
use realty_console::auth::gate::{decide, AccessPolicy, Decision};
use realty_console::auth::session::{SessionState, UnresolvedReason};
use realty_console::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct AccessCheckArgs {
    /// Role of the signed-in principal (user, customer, owner, admin,
    /// superadmin); omit for an anonymous session
    #[arg(long)]
    pub(crate) role: Option<String>,
    /// Treat the session as still resolving
    #[arg(long)]
    pub(crate) loading: bool,
    /// Role allowed into the area (repeatable); no occurrences means the
    /// area is unrestricted
    #[arg(long = "allow")]
    pub(crate) allow: Vec<String>,
}

pub(crate) fn run_access_check(args: AccessCheckArgs) -> Result<(), AppError> {
    let AccessCheckArgs {
        role,
        loading,
        allow,
    } = args;

    let session = if loading {
        SessionState::Loading
    } else {
        match role.as_deref() {
            Some(value) => SessionState::Resolved(Principal {
                id: PrincipalId("cli-check".to_string()),
                full_name: "CLI check".to_string(),
                email: "cli@localhost".to_string(),
                role: Role::parse(value),
            }),
            None => SessionState::Unresolved(UnresolvedReason::NotAuthenticated),
        }
    };

    let policy = AccessPolicy::allow(allow.iter().map(|value| Role::parse(value)));
    let decision = decide(&policy, &session);

    println!("Access gate check");
    match &session {
        SessionState::Loading => println!("- session: loading"),
        SessionState::Resolved(principal) => {
            println!("- session: resolved as {}", principal.role.label())
        }
        SessionState::Unresolved(_) => println!("- session: anonymous"),
    }
    if policy.is_unrestricted() {
        println!("- area: unrestricted");
    } else {
        println!(
            "- area: restricted to [{}]",
            allow
                .iter()
                .map(|value| Role::parse(value).label())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    match decision {
        Decision::Render => println!("- decision: render the requested view"),
        Decision::Wait => println!("- decision: wait (session still resolving)"),
        Decision::RedirectPublic { notice } => {
            println!("- decision: redirect to the public landing route");
            if let Some(notice) = notice {
                println!("- notice: {notice}");
            }
        }
        Decision::RedirectRoleHome { role, notice } => {
            println!("- decision: redirect to the {} home route", role.label());
            if let Some(notice) = notice {
                println!("- notice: {notice}");
            }
        }
    }

    Ok(())
}
