mod common;

use common::Fixture;
use orgbook::error::Error;
use orgbook::resolver::{LookupQuery, OrganizationLookup, RequestContext, UserInput, UserLookup};
use orgbook::types::{SearchFilter, UpdateDepartment, UpdateRole, UserFilter};

#[test]
fn test_non_admin_lists_only_own_organization() {
    let fx = Fixture::new();
    let (acme, acme_ctx) = fx.register("Acme");
    let (globex, _) = fx.register("Globex");

    let page = fx
        .resolver
        .departments(&acme_ctx, None, &SearchFilter::default())
        .unwrap();
    assert_eq!(page.total, 1);
    assert!(page.items.iter().all(|d| d.org_uid == acme.organization.uid));

    // Asking for another tenant is ignored for non-admins.
    let page = fx
        .resolver
        .departments(&acme_ctx, Some(globex.organization.uid), &SearchFilter::default())
        .unwrap();
    assert!(page.items.iter().all(|d| d.org_uid == acme.organization.uid));

    let ctx = acme_ctx.clone().with_organization(globex.organization.uid);
    let page = fx
        .resolver
        .users(&ctx, None, &SearchFilter::default(), &UserFilter::default())
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, acme.user.id);
}

#[test]
fn test_admin_sees_every_tenant_or_the_requested_one() {
    let fx = Fixture::new();
    let (acme, _) = fx.register("Acme");
    fx.register("Globex");

    let all = fx
        .resolver
        .departments(&fx.admin, None, &SearchFilter::default())
        .unwrap();
    assert_eq!(all.total, 2);

    let ctx = fx.admin.clone().with_organization(acme.organization.uid);
    let scoped = fx
        .resolver
        .departments(&ctx, None, &SearchFilter::default())
        .unwrap();
    assert_eq!(scoped.total, 1);
    assert_eq!(scoped.items[0].org_uid, acme.organization.uid);
}

#[test]
fn test_foreign_rows_are_not_found() {
    let fx = Fixture::new();
    let (_, acme_ctx) = fx.register("Acme");
    let (globex, _) = fx.register("Globex");

    let lookup = LookupQuery {
        id: Some(globex.department.id),
        code: None,
    };
    let err = fx.resolver.department(&acme_ctx, &lookup).unwrap_err();
    assert!(matches!(err, Error::NotFound(ref m) if m == "department not found"));

    let err = fx
        .resolver
        .department_update(
            &acme_ctx,
            globex.department.id,
            &UpdateDepartment {
                name: Some("Taken".into()),
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = fx
        .resolver
        .user(
            &acme_ctx,
            &UserLookup {
                email: Some(globex.user.email.clone()),
                ..UserLookup::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(ref m) if m == "user not found"));

    let err = fx
        .resolver
        .organization(
            &acme_ctx,
            &OrganizationLookup {
                uid: Some(globex.organization.uid),
                code: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    // The super admin has no organization and is invisible to tenants.
    let err = fx
        .resolver
        .user(
            &acme_ctx,
            &UserLookup {
                id: Some(fx.admin_user.id),
                ..UserLookup::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_role_outside_management_needs_permission() {
    let fx = Fixture::new();
    let (_, manager) = fx.register("Acme");
    let (_, reader) = fx.member(&manager, "reader@acme.test", &["READ_DEPARTMENT"]);

    assert!(
        fx.resolver
            .departments(&reader, None, &SearchFilter::default())
            .is_ok()
    );

    let err = fx
        .resolver
        .users(&reader, None, &SearchFilter::default(), &UserFilter::default())
        .unwrap_err();
    assert!(matches!(err, Error::PermissionDenied));

    let err = fx
        .resolver
        .organizations(&reader, &SearchFilter::default(), &Default::default())
        .unwrap_err();
    assert!(matches!(err, Error::PermissionDenied));
}

#[test]
fn test_permissions_follow_role_edits() {
    let fx = Fixture::new();
    let (_, manager) = fx.register("Acme");
    let (reader_user, reader) = fx.member(&manager, "reader@acme.test", &["READ_DEPARTMENT"]);
    let role_id = reader_user.role_id.unwrap();
    let search = SearchFilter::default();

    assert!(fx.resolver.departments(&reader, None, &search).is_ok());

    fx.resolver
        .role_update(
            &manager,
            role_id,
            &UpdateRole {
                permissions: Some(vec!["READ_USER".into()]),
                ..UpdateRole::default()
            },
        )
        .unwrap();

    // Same session, next call: the revoked permission no longer applies.
    for _ in 0..2 {
        let err = fx.resolver.departments(&reader, None, &search).unwrap_err();
        assert!(matches!(err, Error::PermissionDenied));
    }
    assert!(
        fx.resolver
            .users(&reader, None, &search, &UserFilter::default())
            .is_ok()
    );
}

#[test]
fn test_user_create_reports_missing_name_before_role() {
    let fx = Fixture::new();
    let (_, manager) = fx.register("Acme");

    let mut input = UserInput {
        last_name: "Clerk".into(),
        email: "clerk@acme.test".into(),
        phone: "555-0101".into(),
        ..UserInput::default()
    };
    let err = fx.resolver.user_create(&manager, &input).unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m == "first name is required"));

    input.first_name = "Casey".into();
    let err = fx.resolver.user_create(&manager, &input).unwrap_err();
    assert!(matches!(err, Error::Forbidden(ref m) if m == "role id is required"));
}

#[test]
fn test_lookup_without_keys_is_forbidden() {
    let fx = Fixture::new();
    let err = fx
        .resolver
        .department(&fx.admin, &LookupQuery::default())
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(ref m) if m == "no query parameters provided"));

    let err = fx
        .resolver
        .user(&fx.admin, &UserLookup::default())
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
}

#[test]
fn test_anonymous_and_bogus_tokens_are_rejected() {
    let fx = Fixture::new();
    let search = SearchFilter::default();

    let err = fx
        .resolver
        .departments(&RequestContext::anonymous(), None, &search)
        .unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));

    let err = fx
        .resolver
        .departments(&RequestContext::bearer("not-a-token"), None, &search)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSession));

    let err = fx
        .resolver
        .departments(&RequestContext::bearer(uuid::Uuid::new_v4().to_string()), None, &search)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSession));
}
