use actix_web::{get, post, web, HttpResponse, Responder};
use bcrypt::{hash, verify};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    errors::StoreError,
    models::{AuthUser, Claims, PublicUser},
    store::NewUser,
    utils::{validate_email, validate_name, validate_password},
    AppState,
};

const TOKEN_LIFETIME_DAYS: i64 = 7;

fn issue_token(user_id: Uuid, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (Utc::now() + ChronoDuration::days(TOKEN_LIFETIME_DAYS)).timestamp() as usize;
    let claims = Claims { sub: user_id, exp };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[post("/register")]
pub async fn register(
    app_data: web::Data<AppState>,
    register_json: web::Json<RegisterRequest>,
) -> impl Responder {
    let req = register_json.into_inner();

    if let Some(err) = validate_name(&req.name) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": err }));
    }
    if let Some(err) = validate_email(&req.email) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": err }));
    }
    if let Some(err) = validate_password(&req.password) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": err }));
    }

    let password_hash = match hash(&req.password, 12) {
        Ok(x) => x,
        Err(_) => {
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Hash failed" }))
        }
    };

    let new_user = NewUser {
        name: req.name.trim().to_string(),
        email: req.email.trim().to_lowercase(),
        password_hash,
    };

    match app_data.users.insert(new_user).await {
        Ok(user) => {
            let token = match issue_token(user.id, &app_data.jwt_secret) {
                Ok(token) => token,
                Err(_) => {
                    return HttpResponse::InternalServerError()
                        .json(serde_json::json!({ "error": "Token creation failed" }))
                }
            };
            log::info!("user registered: {}", user.email);
            HttpResponse::Created()
                .json(serde_json::json!({ "user": PublicUser::from(&user), "token": token }))
        }
        Err(StoreError::DuplicateEmail) => {
            HttpResponse::Conflict().json(serde_json::json!({ "error": "Email already registered" }))
        }
        Err(err) => {
            log::error!("registration failed: {err}");
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": "Server error" }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Unknown email and wrong password produce the same 401 so the response
/// does not reveal which one failed.
#[post("/login")]
pub async fn login(
    app_data: web::Data<AppState>,
    login_json: web::Json<LoginRequest>,
) -> impl Responder {
    let req = login_json.into_inner();
    let email = req.email.trim().to_lowercase();

    let user = match app_data.users.find_by_email(&email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Invalid email or password" }))
        }
        Err(err) => {
            log::error!("login lookup failed: {err}");
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Server error" }));
        }
    };

    match verify(&req.password, &user.password_hash) {
        Ok(true) => (),
        Ok(false) => {
            return HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Invalid email or password" }))
        }
        Err(_) => {
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Password verification error" }))
        }
    }

    let token = match issue_token(user.id, &app_data.jwt_secret) {
        Ok(token) => token,
        Err(_) => {
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Token creation failed" }))
        }
    };

    log::info!("user logged in: {}", user.email);
    HttpResponse::Ok().json(serde_json::json!({ "user": PublicUser::from(&user), "token": token }))
}

#[get("")]
pub async fn me(app_data: web::Data<AppState>, auth: web::ReqData<AuthUser>) -> impl Responder {
    match app_data.users.find_by_id(auth.id).await {
        Ok(Some(user)) => HttpResponse::Ok().json(PublicUser::from(&user)),
        // A valid token for a user that no longer exists.
        Ok(None) => {
            HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Not authenticated" }))
        }
        Err(err) => {
            log::error!("profile lookup failed: {err}");
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": "Server error" }))
        }
    }
}
