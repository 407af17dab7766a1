use std::sync::Arc;

use common::storage::{FileStore, FilesystemFileStore};
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::services::printing::{LineSink, StdoutSink};
use crate::services::{
    AnalyticsService, AvatarService, FacultyService, PrintingService, StudentService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub students: StudentService,
    pub faculties: FacultyService,
    pub avatars: AvatarService,
    pub analytics: AnalyticsService,
    pub printing: PrintingService,
}

impl AppState {
    /// Wire every service from the configuration and a connected database.
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        Self::with_sink(config, db, Arc::new(StdoutSink))
    }

    /// Like [`AppState::new`] with a custom destination for the printing demos.
    pub fn with_sink(config: AppConfig, db: DatabaseConnection, sink: Arc<dyn LineSink>) -> Self {
        let store: Arc<dyn FileStore> = Arc::new(FilesystemFileStore::new(&config.avatar.dir));

        Self {
            students: StudentService::new(db.clone(), Arc::clone(&store)),
            faculties: FacultyService::new(db.clone()),
            avatars: AvatarService::new(db.clone(), store, config.avatar.preview_width),
            analytics: AnalyticsService::new(db.clone()),
            printing: PrintingService::new(db, sink),
            config: Arc::new(config),
        }
    }
}
