mod common;

use common::Fixture;
use orgbook::error::Error;
use orgbook::resolver::{DepartmentInput, RoleInput};
use orgbook::types::{
    CreateOrganization, SearchFilter, SearchPreset, Status, UpdateRole,
};

#[test]
fn test_department_walks_through_states() {
    let fx = Fixture::new();
    let (acme, manager) = fx.register("Acme");

    let dept = fx
        .resolver
        .department_create(
            &manager,
            &DepartmentInput {
                name: "Sales".into(),
                ..DepartmentInput::default()
            },
        )
        .unwrap();
    assert_eq!(dept.code, "DEPT-001-002");
    assert_eq!(dept.org_uid, acme.organization.uid);
    assert_eq!(dept.status, Status::Created);
    assert!(!dept.is_final);

    let err = fx.resolver.department_unarchive(&manager, dept.id).unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m == "department is not archived"));

    let dept = fx.resolver.department_finalize(&manager, dept.id).unwrap();
    assert_eq!(dept.status, Status::Active);
    let err = fx.resolver.department_finalize(&manager, dept.id).unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m == "department is already final"));

    let dept = fx.resolver.department_archive(&manager, dept.id).unwrap();
    assert_eq!(dept.status, Status::Archived);
    let err = fx.resolver.department_archive(&manager, dept.id).unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m == "department is already archived"));

    let dept = fx.resolver.department_unarchive(&manager, dept.id).unwrap();
    assert_eq!(dept.status, Status::Active);
    assert!(dept.is_final && !dept.is_archived);
}

#[test]
fn test_role_requires_ready_department() {
    let fx = Fixture::new();
    let (_, manager) = fx.register("Acme");

    let draft = fx
        .resolver
        .department_create(
            &manager,
            &DepartmentInput {
                name: "Draft".into(),
                ..DepartmentInput::default()
            },
        )
        .unwrap();
    let role = RoleInput {
        department_id: draft.id,
        name: "Clerk".into(),
        ..RoleInput::default()
    };

    let err = fx.resolver.role_create(&manager, &role).unwrap_err();
    assert!(matches!(err, Error::Forbidden(ref m) if m == "department is not yet final"));

    fx.resolver.department_finalize(&manager, draft.id).unwrap();
    fx.resolver.department_archive(&manager, draft.id).unwrap();
    let err = fx.resolver.role_create(&manager, &role).unwrap_err();
    assert!(matches!(err, Error::Forbidden(ref m) if m == "department is archived"));

    fx.resolver.department_unarchive(&manager, draft.id).unwrap();
    let created = fx.resolver.role_create(&manager, &role).unwrap();
    assert_eq!(created.code, "ROLE-001-002");
    assert_eq!(created.status, Status::Created);
}

#[test]
fn test_role_cannot_use_foreign_department() {
    let fx = Fixture::new();
    let (_, manager) = fx.register("Acme");
    let (globex, _) = fx.register("Globex");

    let err = fx
        .resolver
        .role_create(
            &manager,
            &RoleInput {
                department_id: globex.department.id,
                name: "Spy".into(),
                ..RoleInput::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(ref m) if m == "department not found"));
}

#[test]
fn test_role_update_keeps_final_flag() {
    let fx = Fixture::new();
    let (acme, manager) = fx.register("Acme");

    let role = fx
        .resolver
        .role_update(
            &manager,
            acme.role.id,
            &UpdateRole {
                name: Some("Leadership".into()),
                permissions: Some(vec!["READ_USER".into(), "NOT_A_PERMISSION".into()]),
                is_management: Some(false),
                ..UpdateRole::default()
            },
        )
        .unwrap();
    assert_eq!(role.name, "Leadership");
    assert!(role.is_final);
    assert_eq!(role.permissions.len(), 1);
}

#[test]
fn test_archived_organization_blocks_new_rows() {
    let fx = Fixture::new();
    let (acme, manager) = fx.register("Acme");

    fx.resolver
        .organization_archive(&fx.admin, acme.organization.uid)
        .unwrap();

    let err = fx
        .resolver
        .department_create(
            &manager,
            &DepartmentInput {
                name: "Late".into(),
                ..DepartmentInput::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(ref m) if m == "organization is archived"));

    let org = fx
        .resolver
        .organization_unarchive(&fx.admin, acme.organization.uid)
        .unwrap();
    assert_eq!(org.status, Status::Active);
}

#[test]
fn test_organization_archive_is_admin_only() {
    let fx = Fixture::new();
    let (acme, manager) = fx.register("Acme");

    let err = fx
        .resolver
        .organization_archive(&manager, acme.organization.uid)
        .unwrap_err();
    assert!(matches!(err, Error::PermissionDenied));
}

#[test]
fn test_organization_codes_count_globally() {
    let fx = Fixture::new();
    let first = fx
        .resolver
        .organization_create(
            &fx.admin,
            &CreateOrganization {
                name: "Acme".into(),
                sector: "Retail".into(),
                ..CreateOrganization::default()
            },
        )
        .unwrap();
    let second = fx
        .resolver
        .organization_create(
            &fx.admin,
            &CreateOrganization {
                name: "Globex".into(),
                sector: "Energy".into(),
                ..CreateOrganization::default()
            },
        )
        .unwrap();
    assert_eq!(first.code, "ORG001");
    assert_eq!(second.code, "ORG002");
    assert_eq!(second.status, Status::Active);

    let err = fx
        .resolver
        .organization_create(
            &fx.admin,
            &CreateOrganization {
                name: "Nameless".into(),
                ..CreateOrganization::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m == "organization sector is required"));
}

#[test]
fn test_presets_filter_lists() {
    let fx = Fixture::new();
    let (_, manager) = fx.register("Acme");

    for name in ["Ops", "Legal"] {
        fx.resolver
            .department_create(
                &manager,
                &DepartmentInput {
                    name: name.into(),
                    ..DepartmentInput::default()
                },
            )
            .unwrap();
    }

    let drafts = fx
        .resolver
        .departments(&manager, None, &SearchFilter::with_preset(SearchPreset::Draft))
        .unwrap();
    assert_eq!(drafts.total, 2);

    let active = fx
        .resolver
        .departments(&manager, None, &SearchFilter::with_preset(SearchPreset::Active))
        .unwrap();
    assert_eq!(active.total, 1);
    assert_eq!(active.items[0].name, "Management");

    let paged = fx
        .resolver
        .departments(
            &manager,
            None,
            &SearchFilter {
                limit: Some(1),
                ..SearchFilter::default()
            },
        )
        .unwrap();
    assert_eq!(paged.items.len(), 1);
    assert_eq!(paged.total, 3);
}

#[test]
fn test_delete_department_cascades_roles() {
    let fx = Fixture::new();
    let (_, manager) = fx.register("Acme");
    let (member, _) = fx.member(&manager, "clerk@acme.test", &["READ_USER"]);
    let role_id = member.role_id.unwrap();
    let role = fx
        .resolver
        .role(
            &manager,
            &orgbook::resolver::LookupQuery {
                id: Some(role_id),
                code: None,
            },
        )
        .unwrap();

    fx.resolver
        .department_delete(&manager, role.department_id)
        .unwrap();

    let err = fx
        .resolver
        .role(
            &manager,
            &orgbook::resolver::LookupQuery {
                id: Some(role_id),
                code: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
