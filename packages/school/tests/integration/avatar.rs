use image::ImageFormat;

use crate::common::{TestApp, image_bytes, png_bytes, routes};

mod avatar_upload {
    use super::*;

    #[tokio::test]
    async fn upload_stores_file_and_returns_info() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Harry Potter", 17, None).await;
        let original = png_bytes(400, 200);

        let res = app
            .upload(student_id, "portrait.png", original.clone(), "image/png")
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["id"].as_i64().is_some());
        assert_eq!(res.body["studentId"], student_id);
        assert_eq!(res.body["fileSize"], original.len() as i64);
        assert_eq!(res.body["mediaType"], "image/png");
        let file_path = res.body["filePath"].as_str().unwrap();
        assert!(
            file_path.ends_with(&format!("{student_id}_harry_potter_full.png")),
            "{file_path}"
        );

        let stored = std::fs::read(file_path).unwrap();
        assert_eq!(stored, original);
    }

    #[tokio::test]
    async fn reupload_keeps_single_avatar() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Hermione Granger", 17, None).await;

        let first = app
            .upload(student_id, "a.png", png_bytes(200, 200), "image/png")
            .await;
        assert_eq!(first.status, 201);
        let second_bytes = png_bytes(300, 150);
        let second = app
            .upload(student_id, "b.png", second_bytes.clone(), "image/png")
            .await;
        assert_eq!(second.status, 201);

        assert_eq!(first.body["id"], second.body["id"]);
        assert_eq!(second.body["fileSize"], second_bytes.len() as i64);

        let page = app.get(&format!("{}?page=1&size=10", routes::AVATARS)).await;
        assert_eq!(page.body["totalElements"], 1);
    }

    #[tokio::test]
    async fn reupload_with_new_extension_removes_old_file() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Ron Weasley", 17, None).await;

        let png = app
            .upload(student_id, "ron.png", png_bytes(120, 80), "image/png")
            .await;
        let old_path = png.body["filePath"].as_str().unwrap().to_string();
        let jpg = app
            .upload(
                student_id,
                "ron.jpg",
                image_bytes(120, 80, ImageFormat::Jpeg),
                "image/jpeg",
            )
            .await;

        assert_eq!(jpg.status, 201);
        assert_eq!(jpg.body["mediaType"], "image/jpeg");
        assert!(!std::path::Path::new(&old_path).exists());
        assert!(std::path::Path::new(jpg.body["filePath"].as_str().unwrap()).exists());
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Harry Potter", 17, None).await;

        let res = app.upload(student_id, "empty.png", Vec::new(), "image/png").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "INVALID_FILE");
        assert_eq!(res.body["message"], "Uploaded file is empty or invalid");
    }

    #[tokio::test]
    async fn file_without_extension_is_rejected() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Harry Potter", 17, None).await;

        let res = app
            .upload(student_id, "portrait", png_bytes(10, 10), "image/png")
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "INVALID_FILE");
        assert_eq!(res.body["message"], "File extension is missing or invalid");
    }

    #[tokio::test]
    async fn unknown_student_writes_nothing() {
        let app = TestApp::spawn().await;

        let res = app.upload(77, "a.png", png_bytes(10, 10), "image/png").await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "STUDENT_NOT_FOUND");
        let written = std::fs::read_dir(&app.avatar_dir)
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(written, 0);
    }

    #[tokio::test]
    async fn undecodable_image_is_image_processing_error() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Harry Potter", 17, None).await;

        let res = app
            .upload(student_id, "broken.png", b"not an image".to_vec(), "image/png")
            .await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "IMAGE_PROCESSING_ERROR");
        assert_eq!(
            res.body["message"],
            "Failed to process image during preview generation"
        );

        let info = app.get(&routes::avatar_info(student_id)).await;
        assert_eq!(info.status, 404);
        let written = std::fs::read_dir(&app.avatar_dir)
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(written, 0);
    }

    #[tokio::test]
    async fn failed_reupload_keeps_previous_avatar() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Ron Weasley", 17, None).await;
        let original = png_bytes(200, 100);
        let first = app
            .upload(student_id, "a.png", original.clone(), "image/png")
            .await;
        assert_eq!(first.status, 201);

        let res = app
            .upload(student_id, "a.png", b"definitely not a png".to_vec(), "image/png")
            .await;
        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "IMAGE_PROCESSING_ERROR");

        let info = app.get(&routes::avatar_info(student_id)).await;
        assert_eq!(info.body, first.body);

        let full = app.get(&routes::avatar_full(student_id)).await;
        assert_eq!(full.status, 200);
        assert_eq!(full.bytes, original);

        let preview = app.get(&routes::avatar_preview(student_id)).await;
        let decoded = image::load_from_memory(&preview.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 50));
    }
}

mod avatar_read {
    use super::*;

    #[tokio::test]
    async fn preview_is_fixed_width() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Luna Lovegood", 16, None).await;
        app.upload(student_id, "luna.png", png_bytes(400, 300), "image/png")
            .await;

        let res = app.get(&routes::avatar_preview(student_id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.header("content-type"), "image/png");
        assert_eq!(res.header("content-disposition"), "inline; filename=preview.png");
        assert_eq!(
            res.header("content-length"),
            res.bytes.len().to_string().as_str()
        );
        let preview = image::load_from_memory(&res.bytes).unwrap();
        assert_eq!(preview.width(), 100);
        assert_eq!(preview.height(), 75);
    }

    #[tokio::test]
    async fn info_describes_stored_avatar() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Neville Longbottom", 17, None).await;
        let uploaded = app
            .upload(student_id, "neville.png", png_bytes(50, 50), "image/png")
            .await;

        let res = app.get(&routes::avatar_info(student_id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, uploaded.body);
    }

    #[tokio::test]
    async fn full_streams_original_bytes() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Ginny Weasley", 16, None).await;
        let original = png_bytes(640, 480);
        app.upload(student_id, "ginny.png", original.clone(), "image/png")
            .await;

        let res = app.get(&routes::avatar_full(student_id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.header("content-type"), "image/png");
        assert_eq!(
            res.header("content-length"),
            original.len().to_string().as_str()
        );
        assert_eq!(res.bytes, original);
    }

    #[tokio::test]
    async fn missing_avatar_returns_404() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Harry Potter", 17, None).await;

        for path in [
            routes::avatar_info(student_id),
            routes::avatar_preview(student_id),
            routes::avatar_full(student_id),
        ] {
            let res = app.get(&path).await;
            assert_eq!(res.status, 404, "{path}");
            assert_eq!(res.body["code"], "AVATAR_NOT_FOUND");
            assert_eq!(
                res.body["message"],
                format!("Avatar not found for Student with ID {student_id}")
            );
        }

        let res = app.get(&routes::avatar_info(999)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "STUDENT_NOT_FOUND");
    }

    #[tokio::test]
    async fn missing_file_on_disk_is_file_processing_error() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Harry Potter", 17, None).await;
        let uploaded = app
            .upload(student_id, "harry.png", png_bytes(20, 20), "image/png")
            .await;
        std::fs::remove_file(uploaded.body["filePath"].as_str().unwrap()).unwrap();

        let res = app.get(&routes::avatar_full(student_id)).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "FILE_PROCESSING_ERROR");
        assert_eq!(
            res.body["message"],
            "Failed to process file during avatar file streaming operation"
        );
    }

    #[tokio::test]
    async fn deleting_student_removes_avatar() {
        let app = TestApp::spawn().await;
        let student_id = app.create_student("Cedric Diggory", 17, None).await;
        let uploaded = app
            .upload(student_id, "cedric.png", png_bytes(20, 20), "image/png")
            .await;
        let file_path = uploaded.body["filePath"].as_str().unwrap().to_string();

        let res = app.delete(&routes::student(student_id)).await;
        assert_eq!(res.status, 200);

        assert!(!std::path::Path::new(&file_path).exists());
        let page = app.get(&format!("{}?page=1&size=10", routes::AVATARS)).await;
        assert_eq!(page.body["totalElements"], 0);
    }
}

mod avatar_pages {
    use super::*;

    async fn seed(app: &TestApp, count: usize) -> Vec<i32> {
        let mut ids = Vec::new();
        for i in 0..count {
            let student_id = app.create_student(&format!("Student {i}"), 16, None).await;
            let res = app
                .upload(student_id, "face.png", png_bytes(10, 10), "image/png")
                .await;
            assert_eq!(res.status, 201);
            ids.push(student_id);
        }
        ids
    }

    #[tokio::test]
    async fn first_page_starts_at_first_avatar() {
        let app = TestApp::spawn().await;
        let ids = seed(&app, 3).await;

        let res = app.get(&format!("{}?page=1&size=10", routes::AVATARS)).await;

        assert_eq!(res.status, 200);
        let content = res.body["content"].as_array().unwrap();
        assert_eq!(content.len(), 3);
        assert_eq!(content[0]["studentId"], ids[0]);
        assert_eq!(res.body["page"], 1);
        assert_eq!(res.body["size"], 10);
        assert_eq!(res.body["totalElements"], 3);
        assert_eq!(res.body["totalPages"], 1);
    }

    #[tokio::test]
    async fn later_page_is_offset() {
        let app = TestApp::spawn().await;
        let ids = seed(&app, 3).await;

        let res = app.get(&format!("{}?page=2&size=2", routes::AVATARS)).await;

        assert_eq!(res.status, 200);
        let content = res.body["content"].as_array().unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0]["studentId"], ids[2]);
        assert_eq!(res.body["totalPages"], 2);
    }

    #[tokio::test]
    async fn defaults_apply_without_parameters() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::AVATARS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["page"], 1);
        assert_eq!(res.body["size"], 10);
        assert_eq!(res.body["content"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn huge_page_number_is_rejected() {
        let app = TestApp::spawn().await;
        seed(&app, 1).await;

        let res = app
            .get(&format!("{}?page=1000000000000000000&size=100", routes::AVATARS))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "BAD_REQUEST");
        assert_eq!(res.body["message"], "Page number is too large");
    }

    #[tokio::test]
    async fn zero_page_or_size_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(&format!("{}?page=0&size=10", routes::AVATARS)).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "BAD_REQUEST");
        assert_eq!(res.body["message"], "Page number must be greater than 0");

        let res = app.get(&format!("{}?page=1&size=0", routes::AVATARS)).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Page size must be greater than 0");
    }
}
