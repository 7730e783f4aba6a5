mod common;

use chrono::Duration;
use common::{ADMIN_EMAIL, Fixture};
use orgbook::error::Error;
use orgbook::resolver::RequestContext;
use orgbook::types::{LoginRequest, OtpRequest, UpdateUser};

#[test]
fn test_otp_login_and_logout() {
    let fx = Fixture::new();
    let me = fx.resolver.me(&fx.admin).unwrap();
    assert_eq!(me.email, ADMIN_EMAIL);

    let auther = fx.resolver.auther(&fx.admin).unwrap();
    assert!(auther.is_admin);
    assert_eq!(auther.name, "Super Admin");

    fx.resolver.logout(&fx.admin).unwrap();
    let err = fx.resolver.me(&fx.admin).unwrap_err();
    assert!(matches!(err, Error::SessionInvalidated));
}

#[test]
fn test_otp_is_single_use() {
    let fx = Fixture::new();
    let otp = fx
        .resolver
        .generate_otp(&RequestContext::anonymous(), &OtpRequest {
            email: None,
            phone: Some("9000090000".into()),
        })
        .unwrap();
    assert_eq!(otp.token.len(), orgbook::auth::OTP_LENGTH);

    let req = LoginRequest {
        email: Some(ADMIN_EMAIL.into()),
        phone: None,
        otp: otp.token.clone(),
    };
    let public = RequestContext::anonymous();
    fx.resolver.login(&public, &req).unwrap();
    let sessions = fx.count("auth_sessions");
    let activities = fx.count("user_activities");

    let err = fx.resolver.login(&public, &req).unwrap_err();
    assert!(matches!(err, Error::Unauthorized(ref m) if m == "otp is not valid"));
    assert_eq!(fx.count("auth_sessions"), sessions);
    assert_eq!(fx.count("user_activities"), activities);
}

#[test]
fn test_otp_belongs_to_its_user() {
    let fx = Fixture::new();
    let (acme, _) = fx.register("Acme");
    let otp = fx
        .resolver
        .generate_otp(&RequestContext::anonymous(), &OtpRequest {
            email: Some(acme.user.email.clone()),
            phone: None,
        })
        .unwrap();

    let err = fx
        .resolver
        .login(&RequestContext::anonymous(), &LoginRequest {
            email: Some(ADMIN_EMAIL.into()),
            phone: None,
            otp: otp.token,
        })
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(ref m) if m == "otp is invalid"));
}

#[test]
fn test_expired_otp_is_rejected() {
    let fx = Fixture::new();
    let otp = fx
        .resolver
        .generate_otp(&RequestContext::anonymous(), &OtpRequest {
            email: Some(ADMIN_EMAIL.into()),
            phone: None,
        })
        .unwrap();

    let past = (otp.created_at - Duration::minutes(10)).to_rfc3339();
    fx.resolver
        .store()
        .conn()
        .execute(
            "UPDATE otp_sessions SET expires_at = ?1 WHERE id = ?2",
            rusqlite::params![past, otp.id],
        )
        .unwrap();

    let err = fx
        .resolver
        .login(&RequestContext::anonymous(), &LoginRequest {
            email: Some(ADMIN_EMAIL.into()),
            phone: None,
            otp: otp.token,
        })
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(ref m) if m == "otp is expired"));
}

#[test]
fn test_unknown_recipient() {
    let fx = Fixture::new();
    let err = fx
        .resolver
        .generate_otp(&RequestContext::anonymous(), &OtpRequest {
            email: Some("nobody@example.com".into()),
            phone: None,
        })
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(ref m) if m == "no user found with given email"));

    let err = fx
        .resolver
        .generate_otp(&RequestContext::anonymous(), &OtpRequest::default())
        .unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m == "email or phone is required"));
}

#[test]
fn test_archived_user_cannot_log_in() {
    let fx = Fixture::new();
    let (acme, _) = fx.register("Acme");
    let otp = fx
        .resolver
        .generate_otp(&RequestContext::anonymous(), &OtpRequest {
            email: Some(acme.user.email.clone()),
            phone: None,
        })
        .unwrap();
    fx.resolver.user_archive(&fx.admin, acme.user.id).unwrap();

    let err = fx
        .resolver
        .login(&RequestContext::anonymous(), &LoginRequest {
            email: Some(acme.user.email.clone()),
            phone: None,
            otp: otp.token,
        })
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(ref m) if m == "user is archived"));
}

#[test]
fn test_expired_session() {
    let fx = Fixture::new();
    let token = fx.admin.token.clone().unwrap();
    fx.resolver
        .store()
        .conn()
        .execute(
            "UPDATE auth_sessions SET expires_at = '2000-01-01T00:00:00.000000Z' WHERE token = ?1",
            [&token],
        )
        .unwrap();

    let err = fx.resolver.me(&fx.admin).unwrap_err();
    assert!(matches!(err, Error::SessionExpired));
}

#[test]
fn test_change_details_ignores_role() {
    let fx = Fixture::new();
    let (acme, manager) = fx.register("Acme");
    let (member, _) = fx.member(&manager, "clerk@acme.test", &[]);

    let user = fx
        .resolver
        .change_details(
            &manager,
            &UpdateUser {
                first_name: Some("Renamed".into()),
                role_id: member.role_id,
                ..UpdateUser::default()
            },
        )
        .unwrap();
    assert_eq!(user.first_name, "Renamed");
    assert_eq!(user.role_id, Some(acme.role.id));

    let err = fx
        .resolver
        .change_details(
            &manager,
            &UpdateUser {
                email: Some(member.email.clone()),
                ..UpdateUser::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m == "email already registered"));

    let err = fx
        .resolver
        .change_details(
            &manager,
            &UpdateUser {
                phone: Some(member.phone.clone()),
                ..UpdateUser::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::BadRequest(ref m) if m == "phone already registered"));
}

#[test]
fn test_expired_deadline_rolls_back_login() {
    let fx = Fixture::new();
    let otp = fx
        .resolver
        .generate_otp(&RequestContext::anonymous(), &OtpRequest {
            email: Some(ADMIN_EMAIL.into()),
            phone: None,
        })
        .unwrap();
    let sessions = fx.count("auth_sessions");

    let late = RequestContext::anonymous().with_deadline(std::time::Instant::now());
    let err = fx
        .resolver
        .login(&late, &LoginRequest {
            email: Some(ADMIN_EMAIL.into()),
            phone: None,
            otp: otp.token.clone(),
        })
        .unwrap_err();
    assert!(matches!(err, Error::Timeout));
    assert_eq!(fx.count("auth_sessions"), sessions);

    // The code was never consumed.
    fx.resolver
        .login(&RequestContext::anonymous(), &LoginRequest {
            email: Some(ADMIN_EMAIL.into()),
            phone: None,
            otp: otp.token,
        })
        .unwrap();
}

#[test]
fn test_permission_catalog() {
    let fx = Fixture::new();
    let catalog = fx.resolver.permissions();
    assert_eq!(catalog.len(), 18);
    assert!(catalog.contains(&"UPLOAD_FILE"));
    assert!(catalog.contains(&"READ_USER_ACTIVITY"));
}
