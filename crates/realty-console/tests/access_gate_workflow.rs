//! Integration scenarios for the access gate wired into a realistic route
//! table: public marketing surfaces, the shared admin area, and the
//! superadmin-only surfaces, all resolved through one session cache.

mod common {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::Router;

    use realty_console::auth::domain::{Principal, PrincipalId, Role};
    use realty_console::auth::gate::AccessPolicy;
    use realty_console::auth::guard::{self, GuardedArea, RedirectTargets, RouteGuard};
    use realty_console::auth::identity::{
        IdentityClient, IdentityError, LoginRequest, RegisterRequest,
    };
    use realty_console::auth::notice::{Notice, NoticePublisher};
    use realty_console::auth::router::{auth_router, AuthRuntime};
    use realty_console::console::careers::{
        career_admin_router, career_board_router, CareerBoardError, CareerRepository,
        CareerService, JobId, JobPosting,
    };
    use realty_console::console::properties::domain::{PropertyId, ResidentialProperty};
    use realty_console::console::properties::repository::{CatalogueError, PropertyRepository};
    use realty_console::console::properties::router::{catalogue_router, management_router};
    use realty_console::console::properties::service::PropertyService;

    pub(super) fn principal(role: Role) -> Principal {
        Principal {
            id: PrincipalId(format!("u-{}", role.label())),
            full_name: format!("{} account", role.label()),
            email: format!("{}@example.test", role.label()),
            role,
        }
    }

    /// A miniature identity service: a fixed account table plus one ambient
    /// session slot, the way the console's credential sees it.
    pub(super) struct StubIdentity {
        accounts: Mutex<HashMap<String, Principal>>,
        session: Mutex<Option<Principal>>,
        me_calls: AtomicUsize,
    }

    impl StubIdentity {
        pub(super) fn anonymous() -> Arc<Self> {
            Arc::new(Self {
                accounts: Mutex::new(HashMap::new()),
                session: Mutex::new(None),
                me_calls: AtomicUsize::new(0),
            })
        }

        pub(super) fn signed_in(principal: Principal) -> Arc<Self> {
            let stub = Self::anonymous();
            stub.grant(principal.clone());
            *stub.session.lock().expect("session mutex poisoned") = Some(principal);
            stub
        }

        /// Make an account available for login.
        pub(super) fn grant(&self, principal: Principal) {
            self.accounts
                .lock()
                .expect("accounts mutex poisoned")
                .insert(principal.email.clone(), principal);
        }

        pub(super) fn me_calls(&self) -> usize {
            self.me_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IdentityClient for StubIdentity {
        async fn current(&self) -> Result<Principal, IdentityError> {
            self.me_calls.fetch_add(1, Ordering::SeqCst);
            self.session
                .lock()
                .expect("session mutex poisoned")
                .clone()
                .ok_or(IdentityError::NotAuthenticated)
        }

        async fn login(&self, request: LoginRequest) -> Result<Principal, IdentityError> {
            let principal = self
                .accounts
                .lock()
                .expect("accounts mutex poisoned")
                .get(&request.email)
                .cloned()
                .ok_or(IdentityError::NotAuthenticated)?;
            *self.session.lock().expect("session mutex poisoned") = Some(principal.clone());
            Ok(principal)
        }

        async fn register(&self, request: RegisterRequest) -> Result<Principal, IdentityError> {
            let principal = Principal {
                id: PrincipalId(format!("u-{}", request.email)),
                full_name: request.full_name,
                email: request.email,
                role: Role::User,
            };
            self.grant(principal.clone());
            *self.session.lock().expect("session mutex poisoned") = Some(principal.clone());
            Ok(principal)
        }

        async fn logout(&self) -> Result<(), IdentityError> {
            *self.session.lock().expect("session mutex poisoned") = None;
            Ok(())
        }
    }

    #[derive(Default)]
    pub(super) struct MemoryNotices {
        events: Mutex<Vec<Notice>>,
    }

    impl MemoryNotices {
        pub(super) fn messages(&self) -> Vec<String> {
            self.events
                .lock()
                .expect("notice mutex poisoned")
                .iter()
                .map(|notice| notice.message.clone())
                .collect()
        }
    }

    impl NoticePublisher for MemoryNotices {
        fn publish(&self, notice: Notice) {
            self.events
                .lock()
                .expect("notice mutex poisoned")
                .push(notice);
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryCatalogue {
        records: Arc<Mutex<HashMap<PropertyId, ResidentialProperty>>>,
    }

    impl PropertyRepository for MemoryCatalogue {
        fn insert(
            &self,
            record: ResidentialProperty,
        ) -> Result<ResidentialProperty, CatalogueError> {
            let mut guard = self.records.lock().expect("catalogue mutex poisoned");
            if guard.contains_key(&record.id) {
                return Err(CatalogueError::Conflict);
            }
            guard.insert(record.id.clone(), record.clone());
            Ok(record)
        }

        fn list(&self) -> Result<Vec<ResidentialProperty>, CatalogueError> {
            let guard = self.records.lock().expect("catalogue mutex poisoned");
            Ok(guard.values().cloned().collect())
        }

        fn fetch(
            &self,
            id: &PropertyId,
        ) -> Result<Option<ResidentialProperty>, CatalogueError> {
            let guard = self.records.lock().expect("catalogue mutex poisoned");
            Ok(guard.get(id).cloned())
        }

        fn update(&self, record: ResidentialProperty) -> Result<(), CatalogueError> {
            let mut guard = self.records.lock().expect("catalogue mutex poisoned");
            if guard.contains_key(&record.id) {
                guard.insert(record.id.clone(), record);
                Ok(())
            } else {
                Err(CatalogueError::NotFound)
            }
        }

        fn remove(&self, id: &PropertyId) -> Result<(), CatalogueError> {
            let mut guard = self.records.lock().expect("catalogue mutex poisoned");
            guard.remove(id).map(|_| ()).ok_or(CatalogueError::NotFound)
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryBoard {
        postings: Arc<Mutex<HashMap<JobId, JobPosting>>>,
    }

    impl CareerRepository for MemoryBoard {
        fn insert(&self, posting: JobPosting) -> Result<JobPosting, CareerBoardError> {
            let mut guard = self.postings.lock().expect("board mutex poisoned");
            if guard.contains_key(&posting.id) {
                return Err(CareerBoardError::Conflict);
            }
            guard.insert(posting.id.clone(), posting.clone());
            Ok(posting)
        }

        fn list(&self) -> Result<Vec<JobPosting>, CareerBoardError> {
            let guard = self.postings.lock().expect("board mutex poisoned");
            Ok(guard.values().cloned().collect())
        }

        fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, CareerBoardError> {
            let guard = self.postings.lock().expect("board mutex poisoned");
            Ok(guard.get(id).cloned())
        }

        fn update(&self, posting: JobPosting) -> Result<(), CareerBoardError> {
            let mut guard = self.postings.lock().expect("board mutex poisoned");
            if guard.contains_key(&posting.id) {
                guard.insert(posting.id.clone(), posting);
                Ok(())
            } else {
                Err(CareerBoardError::NotFound)
            }
        }

        fn remove(&self, id: &JobId) -> Result<(), CareerBoardError> {
            let mut guard = self.postings.lock().expect("board mutex poisoned");
            guard
                .remove(id)
                .map(|_| ())
                .ok_or(CareerBoardError::NotFound)
        }
    }

    pub(super) struct Harness {
        pub(super) app: Router,
        pub(super) identity: Arc<StubIdentity>,
        pub(super) notices: Arc<MemoryNotices>,
        pub(super) properties: Arc<PropertyService<MemoryCatalogue>>,
    }

    /// Wire the whole surface the way the api service does: auth endpoints,
    /// public reads, the shared admin area, and the superadmin-only area.
    pub(super) fn build_harness(identity: Arc<StubIdentity>) -> Harness {
        let runtime = AuthRuntime::new(identity.clone());
        let notices = Arc::new(MemoryNotices::default());
        let guard = Arc::new(RouteGuard::new(
            runtime.resolver.clone(),
            notices.clone(),
            RedirectTargets::default(),
        ));

        let properties = Arc::new(PropertyService::new(Arc::new(MemoryCatalogue::default())));
        let careers = Arc::new(CareerService::new(Arc::new(MemoryBoard::default())));

        let admin_area = GuardedArea::new(guard.clone(), AccessPolicy::admin_area());
        let superadmin_area = GuardedArea::new(guard, AccessPolicy::superadmin_area());

        let admin_routes = management_router(properties.clone()).layer(
            axum::middleware::from_fn_with_state(
                admin_area,
                guard::enforce::<StubIdentity, MemoryNotices>,
            ),
        );
        let superadmin_routes = career_admin_router(careers.clone()).layer(
            axum::middleware::from_fn_with_state(
                superadmin_area,
                guard::enforce::<StubIdentity, MemoryNotices>,
            ),
        );

        let app = Router::new()
            .merge(auth_router(runtime))
            .merge(catalogue_router(properties.clone()))
            .merge(career_board_router(careers))
            .merge(admin_routes)
            .merge(superadmin_routes);

        Harness {
            app,
            identity,
            notices,
            properties,
        }
    }
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::*;
use realty_console::auth::domain::{Principal, PrincipalId, Role};
use realty_console::auth::gate::{NOTICE_ACCESS_DENIED, NOTICE_ADMIN_ROUTES, NOTICE_OWNER_ROUTES};
use realty_console::console::properties::domain::{ListingStatus, PropertyDraft};
use tower::ServiceExt;

fn draft(name: &str, status: ListingStatus) -> PropertyDraft {
    PropertyDraft {
        name: name.to_string(),
        location: "Sector 150, Noida".to_string(),
        price: 12_500_000,
        size_sqft: 1850,
        bedrooms: 3,
        bathrooms: 3,
        status,
    }
}

fn location_of(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[tokio::test]
async fn anonymous_navigation_to_admin_routes_redirects_public_silently() {
    let harness = build_harness(StubIdentity::anonymous());

    let response = harness
        .app
        .oneshot(
            Request::get("/admin/residential")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response).as_deref(), Some("/"));
    assert!(harness.notices.messages().is_empty());
}

#[tokio::test]
async fn customer_is_turned_away_from_the_admin_area_with_notice() {
    let harness = build_harness(StubIdentity::signed_in(principal(Role::Customer)));

    let response = harness
        .app
        .oneshot(
            Request::get("/admin/residential")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response).as_deref(), Some("/"));
    assert_eq!(
        harness.notices.messages(),
        vec![NOTICE_ADMIN_ROUTES.to_string()]
    );
}

#[tokio::test]
async fn admin_reaching_superadmin_surface_is_sent_home() {
    let harness = build_harness(StubIdentity::signed_in(principal(Role::Admin)));

    let response = harness
        .app
        .oneshot(
            Request::delete("/careers/delete/job-000001")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response).as_deref(), Some("/admin"));
    assert_eq!(
        harness.notices.messages(),
        vec![NOTICE_OWNER_ROUTES.to_string()]
    );
}

#[tokio::test]
async fn unknown_role_is_denied_with_generic_notice() {
    let surprise = Principal {
        id: PrincipalId("u-999".to_string()),
        full_name: "Surprise Role".to_string(),
        email: "surprise@example.test".to_string(),
        role: Role::Unknown,
    };
    let harness = build_harness(StubIdentity::signed_in(surprise));

    let response = harness
        .app
        .oneshot(
            Request::get("/admin/residential")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response).as_deref(), Some("/"));
    assert_eq!(
        harness.notices.messages(),
        vec![NOTICE_ACCESS_DENIED.to_string()]
    );
}

#[tokio::test]
async fn admin_manages_listings_through_the_gate() {
    let harness = build_harness(StubIdentity::signed_in(principal(Role::Admin)));

    let response = harness
        .app
        .clone()
        .oneshot(
            Request::post("/residential/create")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&draft("Skyline Residency", ListingStatus::Active))
                        .unwrap(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);

    // The listing shows up on the public surface without any gate in the way.
    let response = harness
        .app
        .oneshot(
            Request::get("/residential/all")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
    let listings = payload
        .get("data")
        .and_then(serde_json::Value::as_array)
        .expect("data array");
    assert_eq!(listings.len(), 1);
}

#[tokio::test]
async fn draft_listings_stay_off_the_public_surface() {
    let harness = build_harness(StubIdentity::signed_in(principal(Role::Superadmin)));
    harness
        .properties
        .create(
            draft("Hidden Draft", ListingStatus::Draft),
            chrono::NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
        )
        .expect("seed draft");

    let response = harness
        .app
        .clone()
        .oneshot(
            Request::get("/residential/all")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(
        payload
            .get("data")
            .and_then(serde_json::Value::as_array)
            .map(Vec::len),
        Some(0)
    );

    // The gated management listing still shows the draft.
    let response = harness
        .app
        .oneshot(
            Request::get("/admin/residential")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(
        payload
            .get("data")
            .and_then(serde_json::Value::as_array)
            .map(Vec::len),
        Some(1)
    );
}

#[tokio::test]
async fn session_is_resolved_once_across_many_gated_navigations() {
    let harness = build_harness(StubIdentity::signed_in(principal(Role::Superadmin)));

    for _ in 0..3 {
        let response = harness
            .app
            .clone()
            .oneshot(
                Request::get("/admin/residential")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(
        harness.identity.me_calls(),
        1,
        "gate evaluations reuse the cached session"
    );
}
