use serde_json::json;

use crate::common::{TestApp, routes};

mod student_analytics {
    use super::*;

    async fn seed(app: &TestApp) {
        for (name, age) in [
            ("Hermione Granger", 17),
            ("harry Potter", 17),
            ("Hannah Abbott", 16),
            ("Ron Weasley", 18),
            ("Albus Dumbledore", 99),
        ] {
            app.create_student(name, age, None).await;
        }
    }

    #[tokio::test]
    async fn names_by_letter_ignore_case_and_sort() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let upper = app
            .get(&format!("{}?letter=H", routes::NAMES_STARTING_WITH))
            .await;
        let lower = app
            .get(&format!("{}?letter=h", routes::NAMES_STARTING_WITH))
            .await;

        assert_eq!(upper.status, 200);
        assert_eq!(
            upper.body,
            json!(["HANNAH ABBOTT", "HARRY POTTER", "HERMIONE GRANGER"])
        );
        assert_eq!(upper.body, lower.body);
    }

    #[tokio::test]
    async fn names_default_to_letter_a() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get(routes::NAMES_STARTING_WITH).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!(["ALBUS DUMBLEDORE"]));
    }

    #[tokio::test]
    async fn blank_letter_matches_nothing() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app
            .get(&format!("{}?letter=", routes::NAMES_STARTING_WITH))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn in_app_average_matches_store_average() {
        let app = TestApp::spawn().await;

        let empty = app.get(routes::AVERAGE_AGE_IN_APP).await;
        assert_eq!(empty.body.as_f64().unwrap(), 0.0);

        seed(&app).await;
        let in_app = app.get(routes::AVERAGE_AGE_IN_APP).await;
        let in_store = app.get(routes::STUDENT_AVERAGE_AGE).await;

        assert_eq!(in_app.status, 200);
        assert_eq!(in_app.body.as_f64().unwrap(), 33.4);
        assert!((in_app.body.as_f64().unwrap() - in_store.body.as_f64().unwrap()).abs() < 1e-9);
    }
}

mod faculty_analytics {
    use super::*;

    #[tokio::test]
    async fn longest_name_prefers_first_on_tie() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::LONGEST_FACULTY_NAME).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body, "");

        app.create_faculty("Slytherin", "#00FF00").await;
        app.create_faculty("Hufflepuff", "#FFFF00").await;
        app.create_faculty("Gryffindor", "#FF0000").await;

        let res = app.get(routes::LONGEST_FACULTY_NAME).await;
        assert_eq!(res.body, "Hufflepuff");
    }
}

mod compute {
    use super::*;

    #[tokio::test]
    async fn sums_over_first_million() {
        let app = TestApp::spawn().await;

        let original = app.get(routes::ORIGINAL_SUM).await;
        assert_eq!(original.status, 200);
        assert_eq!(original.body, 1_784_293_664i64);

        let optimized = app.get(routes::OPTIMIZED_SUM).await;
        assert_eq!(optimized.status, 200);
        assert_eq!(optimized.body, 500_000_500_000i64);

        let math = app.get(routes::MATH_SUM).await;
        assert_eq!(math.status, 200);
        assert_eq!(math.body, optimized.body);
    }
}

mod info {
    use super::*;

    #[tokio::test]
    async fn port_without_profiles() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::INFO_PORT).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, "Port: 8080 | Profile: []");
    }

    #[tokio::test]
    async fn port_lists_active_profiles() {
        let app = TestApp::spawn_with_profiles(vec!["dev".into(), "h2".into()]).await;

        let res = app.get(routes::INFO_PORT).await;

        assert_eq!(res.text, "Port: 8080 | Profile: [dev, h2]");
    }

    #[tokio::test]
    async fn openapi_document_lists_resources() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::OPENAPI).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["info"]["title"], "Hogwarts School API");
        let paths = res.body["paths"].as_object().unwrap();
        for path in [
            "/student/{id}",
            "/faculty/search",
            "/avatar/{student_id}/upload",
            "/analytics/compute/math-sum",
            "/info/port",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }
}
