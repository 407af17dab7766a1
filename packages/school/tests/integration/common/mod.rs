use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, RgbImage};
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde_json::{Value, json};
use tempfile::TempDir;

use school::config::{AppConfig, AvatarConfig, CorsConfig, DatabaseConfig, ServerConfig};
use school::services::printing::MemorySink;
use school::state::AppState;

pub mod routes {
    pub const STUDENTS: &str = "/student";
    pub const STUDENT_COUNT: &str = "/student/count";
    pub const STUDENT_AVERAGE_AGE: &str = "/student/average-age";
    pub const STUDENT_LAST_FIVE: &str = "/student/last-five";
    pub const PRINT_PARALLEL: &str = "/student/print-parallel";
    pub const PRINT_SYNCHRONIZED: &str = "/student/print-synchronized";
    pub const FACULTIES: &str = "/faculty";
    pub const AVATARS: &str = "/avatar/all";
    pub const NAMES_STARTING_WITH: &str = "/analytics/students/names-starting-with";
    pub const AVERAGE_AGE_IN_APP: &str = "/analytics/students/average-age-students";
    pub const LONGEST_FACULTY_NAME: &str = "/analytics/faculties/longest-name-faculty";
    pub const ORIGINAL_SUM: &str = "/analytics/compute/original-sum";
    pub const OPTIMIZED_SUM: &str = "/analytics/compute/optimized-sum";
    pub const MATH_SUM: &str = "/analytics/compute/math-sum";
    pub const INFO_PORT: &str = "/info/port";
    pub const OPENAPI: &str = "/api-docs/openapi.json";

    pub fn student(id: i32) -> String {
        format!("/student/{id}")
    }

    pub fn student_faculty(id: i32) -> String {
        format!("/student/{id}/faculty")
    }

    pub fn students_by_age(age: i32) -> String {
        format!("/student/age/{age}")
    }

    pub fn students_by_age_between(min: i32, max: i32) -> String {
        format!("/student/age-between?minAge={min}&maxAge={max}")
    }

    pub fn faculty(id: i32) -> String {
        format!("/faculty/{id}")
    }

    pub fn faculty_students(id: i32) -> String {
        format!("/faculty/{id}/students")
    }

    pub fn faculties_by_color(color: &str) -> String {
        format!("/faculty/color/{}", color.replace('#', "%23"))
    }

    pub fn faculty_search(term: &str) -> String {
        format!("/faculty/search?nameOrColor={}", term.replace('#', "%23"))
    }

    pub fn avatar_upload(student_id: i32) -> String {
        format!("/avatar/{student_id}/upload")
    }

    pub fn avatar_info(student_id: i32) -> String {
        format!("/avatar/{student_id}/preview-info")
    }

    pub fn avatar_preview(student_id: i32) -> String {
        format!("/avatar/{student_id}/preview-data")
    }

    pub fn avatar_full(student_id: i32) -> String {
        format!("/avatar/{student_id}/full")
    }
}

/// A running test server over a scratch SQLite database and avatar directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    /// Output of the printing demos.
    pub printed: Arc<MemorySink>,
    pub avatar_dir: std::path::PathBuf,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
    /// Raw response body as text (lossy).
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let bytes = res
            .bytes()
            .await
            .expect("Failed to read response body")
            .to_vec();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Self {
            status,
            headers,
            bytes,
            text,
            body,
        }
    }

    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_profiles(Vec::new()).await
    }

    pub async fn spawn_with_profiles(profiles: Vec<String>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("school.db").display());
        let avatar_dir = dir.path().join("avatars");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                profiles,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: db_url,
                max_connections: 5,
            },
            avatar: AvatarConfig {
                dir: avatar_dir.display().to_string(),
                preview_width: 100,
                max_upload_bytes: 10 * 1024 * 1024,
            },
        };

        let db = school::database::init_db(&config.database)
            .await
            .expect("Failed to initialize test database");

        let printed = Arc::new(MemorySink::default());
        let state = AppState::with_sink(config, db, printed.clone());
        let app = school::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            printed,
            avatar_dir,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    /// POST a raw body with a JSON content type.
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    pub async fn upload(
        &self,
        student_id: i32,
        file_name: &str,
        file_bytes: Vec<u8>,
        mime: &str,
    ) -> TestResponse {
        let part = reqwest::multipart::Part::bytes(file_bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .expect("Failed to set MIME type");
        let form = reqwest::multipart::Form::new().part("file", part);

        let res = self
            .client
            .post(self.url(&routes::avatar_upload(student_id)))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart upload request");

        TestResponse::from_response(res).await
    }

    pub async fn create_faculty(&self, name: &str, color: &str) -> i32 {
        let res = self
            .post(routes::FACULTIES, &json!({ "name": name, "color": color }))
            .await;
        assert_eq!(res.status, 201, "Faculty creation failed: {}", res.text);
        res.body["id"].as_i64().expect("Missing faculty id") as i32
    }

    pub async fn create_student(&self, name: &str, age: i32, faculty_id: Option<i32>) -> i32 {
        let res = self
            .post(
                routes::STUDENTS,
                &json!({ "name": name, "age": age, "facultyId": faculty_id }),
            )
            .await;
        assert_eq!(res.status, 201, "Student creation failed: {}", res.text);
        res.body["id"].as_i64().expect("Missing student id") as i32
    }
}

/// Encode a solid-color image of the given size.
pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, [200, 40, 40].into()));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("Failed to encode image");
    buf.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    image_bytes(width, height, ImageFormat::Png)
}
