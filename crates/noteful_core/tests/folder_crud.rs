use noteful_core::db::open_db_in_memory;
use noteful_core::{
    BodyField, CreateFolderRequest, FolderPatch, FolderRepository, FolderService,
    FolderServiceError, NewFolder, NewNote, NoteRepository, SqliteFolderRepository,
    SqliteNoteRepository, UpdateFolderRequest,
};

fn named(name: &str) -> CreateFolderRequest {
    CreateFolderRequest {
        name: BodyField::Present(name.to_string()),
    }
}

#[test]
fn insert_assigns_new_ids_and_get_returns_inserted_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFolderRepository::new(&conn);

    let first = repo
        .insert_folder(&NewFolder {
            name: "Important".to_string(),
        })
        .unwrap();
    let second = repo
        .insert_folder(&NewFolder {
            name: "Super".to_string(),
        })
        .unwrap();
    assert_eq!(first.id, 1);
    assert_ne!(first.id, second.id);

    let loaded = repo.get_folder(second.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Super");
    assert!(repo.get_folder(999).unwrap().is_none());
}

#[test]
fn list_returns_rows_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let service = FolderService::new(SqliteFolderRepository::new(&conn));
    assert!(service.list_folders().unwrap().is_empty());

    for name in ["Important", "Super", "Spangley"] {
        service.create_folder(named(name)).unwrap();
    }

    let names: Vec<String> = service
        .list_folders()
        .unwrap()
        .into_iter()
        .map(|folder| folder.name)
        .collect();
    assert_eq!(names, ["Important", "Super", "Spangley"]);
}

#[test]
fn update_and_delete_report_affected_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFolderRepository::new(&conn);
    let folder = repo
        .insert_folder(&NewFolder {
            name: "Draft".to_string(),
        })
        .unwrap();

    let patch = FolderPatch {
        name: Some("Final".to_string()),
    };
    assert_eq!(repo.update_folder(folder.id, &patch).unwrap(), 1);
    assert_eq!(repo.update_folder(404, &patch).unwrap(), 0);
    assert_eq!(repo.update_folder(folder.id, &FolderPatch::default()).unwrap(), 0);
    assert_eq!(repo.get_folder(folder.id).unwrap().unwrap().name, "Final");

    assert_eq!(repo.delete_folder(folder.id).unwrap(), 1);
    assert_eq!(repo.delete_folder(folder.id).unwrap(), 0);
}

#[test]
fn deleted_folder_disappears_from_list_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = FolderService::new(SqliteFolderRepository::new(&conn));
    let keep = service.create_folder(named("Keep")).unwrap();
    let drop_me = service.create_folder(named("Drop")).unwrap();

    service.delete_folder(drop_me.id).unwrap();
    let listed = service.list_folders().unwrap();
    assert_eq!(listed, vec![keep]);

    let err = service.delete_folder(drop_me.id).unwrap_err();
    assert!(matches!(err, FolderServiceError::FolderNotFound(id) if id == drop_me.id));
    assert_eq!(err.to_string(), "folder doesn't exist");
}

#[test]
fn deleting_folder_cascades_to_its_notes() {
    let conn = open_db_in_memory().unwrap();
    let folders = SqliteFolderRepository::new(&conn);
    let notes = SqliteNoteRepository::new(&conn);
    let folder = folders
        .insert_folder(&NewFolder {
            name: "Inbox".to_string(),
        })
        .unwrap();
    notes
        .insert_note(&NewNote {
            name: "Call mom".to_string(),
            content: "Sunday".to_string(),
            modified: None,
            folder_id: folder.id,
        })
        .unwrap();

    folders.delete_folder(folder.id).unwrap();
    assert!(notes.list_notes().unwrap().is_empty());
}

#[test]
fn empty_patch_never_touches_the_store() {
    let conn = open_db_in_memory().unwrap();
    let service = FolderService::new(SqliteFolderRepository::new(&conn));
    let folder = service.create_folder(named("Stable")).unwrap();

    for name in [BodyField::Absent, BodyField::Null, BodyField::Present(String::new())] {
        let err = service
            .update_folder(folder.id, UpdateFolderRequest { name })
            .unwrap_err();
        assert!(matches!(err, FolderServiceError::NoUpdatableFields));
    }
    assert_eq!(service.get_folder(folder.id).unwrap().name, "Stable");
}

#[test]
fn update_missing_folder_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = FolderService::new(SqliteFolderRepository::new(&conn));
    let err = service
        .update_folder(
            7,
            UpdateFolderRequest {
                name: BodyField::Present("x".to_string()),
            },
        )
        .unwrap_err();
    assert!(matches!(err, FolderServiceError::FolderNotFound(7)));
}

#[test]
fn views_sanitize_name_but_storage_keeps_raw_text() {
    let conn = open_db_in_memory().unwrap();
    let service = FolderService::new(SqliteFolderRepository::new(&conn));
    let created = service
        .create_folder(named(r#"<script>alert("xss");</script>"#))
        .unwrap();
    assert_eq!(created.name, r#"&lt;script&gt;alert("xss");&lt;/script&gt;"#);

    let raw = SqliteFolderRepository::new(&conn)
        .get_folder(created.id)
        .unwrap()
        .unwrap();
    assert_eq!(raw.name, r#"<script>alert("xss");</script>"#);
}
