use bson::doc;
use pantrylite::Database;
use pantrylite::document::Document;
use pantrylite::errors::DbError;

#[test]
fn database_document_lifecycle() {
    let db = Database::new();
    db.create_collection("recipes");

    let id = db
        .insert_document("recipes", Document::new(doc! {"name": "Pancakes", "servings": 4}))
        .unwrap();
    assert_eq!(db.count("recipes", &pantrylite::query::Filter::True).unwrap(), 1);

    assert!(db.update_document("recipes", &id, doc! {"name": "Crepes", "servings": 2}).unwrap());
    let col = db.get_collection("recipes").unwrap();
    assert_eq!(col.find_document(&id).unwrap().data.get_str("name").unwrap(), "Crepes");

    assert!(db.delete_document("recipes", &id).unwrap());
    assert!(!db.delete_document("recipes", &id).unwrap());
}

#[test]
fn get_document_reports_missing_ids() {
    let db = Database::new();
    db.create_collection("recipes");
    let id = db.insert_document("recipes", Document::new(doc! {"name": "Pancakes"})).unwrap();

    let doc = db.get_document("recipes", &id).unwrap();
    assert_eq!(doc.data.get_str("name").unwrap(), "Pancakes");

    assert!(db.delete_document("recipes", &id).unwrap());
    assert!(matches!(db.get_document("recipes", &id), Err(DbError::NoSuchDocument(_))));
    assert!(matches!(db.get_document("nope", &id), Err(DbError::NoSuchCollection(_))));
}

#[test]
fn unknown_collection_is_an_error() {
    let db = Database::new();
    let e = db.insert_document("nope", Document::new(doc! {"x": 1})).unwrap_err();
    assert!(matches!(e, DbError::NoSuchCollection(_)));
    let e = db.count("nope", &pantrylite::query::Filter::True).unwrap_err();
    assert!(matches!(e, DbError::NoSuchCollection(_)));
}

#[test]
fn collection_management() {
    let db = Database::new();
    db.create_collection("recipes");
    db.create_collection("cookbooks");
    assert_eq!(db.list_collection_names(), vec!["cookbooks", "recipes"]);

    db.rename_collection("cookbooks", "books").unwrap();
    assert!(db.get_collection("books").is_some());
    assert!(db.get_collection("cookbooks").is_none());

    assert!(db.delete_collection("books"));
    assert!(!db.delete_collection("books"));
}
