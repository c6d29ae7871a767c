//! Identity middleware.

use salvo::prelude::*;
use uuid::Uuid;

use crate::extensions::*;

pub(crate) const USER_HEADER: &str = "x-user-uuid";
pub(crate) const ADMIN_HEADER: &str = "x-admin";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(user) = extract_user_uuid(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid X-User-Uuid header"));

        return;
    };

    depot.insert_user_uuid(user);

    ctrl.call_next(req, depot, res).await;
}

/// Gate for back-office operations.
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let is_admin = req
        .header::<String>(ADMIN_HEADER)
        .is_some_and(|value| value.eq_ignore_ascii_case("true"));

    if !is_admin {
        res.render(StatusError::forbidden().brief("Administrator access required"));

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_user_uuid(req: &Request) -> Option<Uuid> {
    req.header::<String>(USER_HEADER)
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
}
