use actix_files::Files;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use serde::Deserialize;
use std::sync::Mutex;

use crate::notify::add_notification;
use crate::roster::{add_subject, remove_subject, Category, Subject};
use crate::schedule::generate_schedule;
use crate::store::{
    list_schedules, persist_schedule, Document, DocumentStore, JsonFileStore,
    ANNOUNCEMENT_COLLECTION, FACULTY_MESSAGE_COLLECTION, NOTIFICATION_COLLECTION,
};

/// Server state: the interactive roster plus the document store
pub struct AppState {
    pub roster: Mutex<Vec<Subject>>,
    pub store: JsonFileStore,
    pub admin_password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Deserialize)]
pub struct AddSubjectRequest {
    name: String,
    faculty: String,
    category: String,
    hours: i64,
}

#[derive(Deserialize)]
pub struct AnnouncementRequest {
    message: String,
}

#[derive(Deserialize)]
pub struct FacultyMessageRequest {
    faculty_name: String,
    message: String,
}

fn sort_newest_first(documents: &mut [Document]) {
    documents.sort_by(|a, b| {
        let ta = a.fields["timestamp"].as_str().unwrap_or("");
        let tb = b.fields["timestamp"].as_str().unwrap_or("");
        tb.cmp(ta)
    });
}

fn is_admin(req: &HttpRequest, state: &AppState) -> bool {
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    password == state.admin_password
}

// Admin login endpoint
async fn admin_login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Invalid password"})))
    }
}

// Current roster
async fn list_subjects(state: web::Data<AppState>) -> Result<HttpResponse> {
    let roster = state.roster.lock().unwrap();
    Ok(HttpResponse::Ok().json(&*roster))
}

// Add a subject to the roster
async fn create_subject(
    req: web::Json<AddSubjectRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let category = match Category::parse(&req.category) {
        Some(category) => category,
        None => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": format!("Unknown category: {}", req.category)
            })))
        }
    };

    let mut roster = state.roster.lock().unwrap();
    match add_subject(&mut roster, &req.name, &req.faculty, category, req.hours) {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "subjects": &*roster
        }))),
        Err(error) => Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": error}))),
    }
}

// Remove a subject from the roster (admin only)
async fn delete_subject(
    name: web::Path<String>,
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !is_admin(&req, &state) {
        return Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    let mut roster = state.roster.lock().unwrap();
    if remove_subject(&mut roster, &name) {
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "subjects": &*roster
        })))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": format!("Subject '{}' not found", name)
        })))
    }
}

// Generate a timetable from the current roster and persist it
//
// The generated schedule is returned even when the persist step fails;
// the failure comes back as a warning instead of replacing the result.
async fn generate(state: web::Data<AppState>) -> Result<HttpResponse> {
    let roster = state.roster.lock().unwrap().clone();

    let schedule = match generate_schedule(&roster) {
        Ok(schedule) => schedule,
        Err(error) => {
            return Ok(HttpResponse::BadRequest()
                .json(serde_json::json!({"success": false, "error": error})))
        }
    };

    match persist_schedule(&state.store, &schedule) {
        Ok(id) => {
            add_notification(&state.store, "A new timetable was generated");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "id": id,
                "schedule": schedule
            })))
        }
        Err(err) => {
            log::error!("Failed to save generated timetable: {}", err);
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "schedule": schedule,
                "warning": format!("Timetable was generated but not saved: {}", err)
            })))
        }
    }
}

// Saved schedules, unordered
async fn get_schedules(state: web::Data<AppState>) -> Result<HttpResponse> {
    match list_schedules(&state.store) {
        Ok(schedules) => Ok(HttpResponse::Ok().json(schedules)),
        Err(err) => Ok(HttpResponse::InternalServerError()
            .json(serde_json::json!({"error": err.to_string()}))),
    }
}

// Post an announcement (admin only)
async fn post_announcement(
    req: HttpRequest,
    body: web::Json<AnnouncementRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !is_admin(&req, &state) {
        return Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }
    if body.message.trim().is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": "Announcement message is required"})));
    }

    let record = serde_json::json!({
        "message": body.message.trim(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    match state.store.append(ANNOUNCEMENT_COLLECTION, record) {
        Ok(id) => {
            add_notification(&state.store, &format!("New Announcement: {}", body.message.trim()));
            Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "id": id})))
        }
        Err(err) => Ok(HttpResponse::InternalServerError()
            .json(serde_json::json!({"success": false, "error": err.to_string()}))),
    }
}

// Announcements, newest first
async fn get_announcements(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.store.list_all(ANNOUNCEMENT_COLLECTION) {
        Ok(mut documents) => {
            sort_newest_first(&mut documents);
            Ok(HttpResponse::Ok().json(documents))
        }
        Err(err) => Ok(HttpResponse::InternalServerError()
            .json(serde_json::json!({"error": err.to_string()}))),
    }
}

// Post a faculty message to the notes board
async fn post_faculty_message(
    body: web::Json<FacultyMessageRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if body.faculty_name.trim().is_empty() || body.message.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(
            serde_json::json!({"success": false, "error": "Faculty name and message are required"}),
        ));
    }

    let record = serde_json::json!({
        "faculty_name": body.faculty_name.trim(),
        "message": body.message.trim(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    match state.store.append(FACULTY_MESSAGE_COLLECTION, record) {
        Ok(id) => Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "id": id}))),
        Err(err) => Ok(HttpResponse::InternalServerError()
            .json(serde_json::json!({"success": false, "error": err.to_string()}))),
    }
}

// Faculty messages, newest first
async fn get_faculty_messages(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.store.list_all(FACULTY_MESSAGE_COLLECTION) {
        Ok(mut documents) => {
            sort_newest_first(&mut documents);
            Ok(HttpResponse::Ok().json(documents))
        }
        Err(err) => Ok(HttpResponse::InternalServerError()
            .json(serde_json::json!({"error": err.to_string()}))),
    }
}

// Notification feed
async fn get_notifications(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.store.list_all(NOTIFICATION_COLLECTION) {
        Ok(documents) => Ok(HttpResponse::Ok().json(documents)),
        Err(err) => Ok(HttpResponse::InternalServerError()
            .json(serde_json::json!({"error": err.to_string()}))),
    }
}

// HTML page handlers
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

async fn admin_page() -> Result<HttpResponse> {
    let html = include_str!("../templates/admin.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(admin_login))
        .route("/api/subjects", web::get().to(list_subjects))
        .route("/api/subjects", web::post().to(create_subject))
        .service(web::resource("/api/subjects/{name}").route(web::delete().to(delete_subject)))
        .route("/api/generate", web::post().to(generate))
        .route("/api/schedules", web::get().to(get_schedules))
        .route("/api/announcements", web::get().to(get_announcements))
        .route("/api/announcements", web::post().to(post_announcement))
        .route("/api/faculty-messages", web::get().to(get_faculty_messages))
        .route("/api/faculty-messages", web::post().to(post_faculty_message))
        .route("/api/notifications", web::get().to(get_notifications));
}

pub async fn start_server(
    port: u16,
    admin_password: String,
    data_dir: String,
) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState {
        roster: Mutex::new(Vec::new()),
        store: JsonFileStore::new(&data_dir),
        admin_password,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .route("/", web::get().to(index))
            .route("/admin", web::get().to(admin_page))
            .configure(configure_api)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
