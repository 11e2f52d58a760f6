use bson::{Bson, doc};
use pantrylite::document::Document;
use pantrylite::engine::Engine;
use pantrylite::query::{
    CmpOp, Filter, FindOptions, Order, SortSpec, count_docs, eval_filter, find_docs,
};

#[test]
fn filter_eq_and_cmp() {
    let d = Document::new(doc! {"age": 30, "name": "alice"});
    assert!(eval_filter(
        &d.data,
        &Filter::Cmp { path: "age".into(), op: CmpOp::Eq, value: Bson::Int64(30) }
    ));
    assert!(!eval_filter(
        &d.data,
        &Filter::Cmp { path: "age".into(), op: CmpOp::Gt, value: Bson::Int64(45) }
    ));
    let lt = Filter::Cmp { path: "age".into(), op: CmpOp::Lt, value: Bson::Int64(40) };
    assert!(eval_filter(&d.data, &lt));
}

#[test]
fn find_sort_project_paginate() {
    let engine = Engine::new();
    let col = engine.create_collection("qtest");
    col.insert_document(Document::new(doc! {"age": 30, "name": "alice"}));
    col.insert_document(Document::new(doc! {"age": 40, "name": "bob"}));
    col.insert_document(Document::new(doc! {"age": 35, "name": "carol"}));

    let filter = Filter::Cmp { path: "age".into(), op: CmpOp::Gt, value: Bson::Int64(30) };
    let opts = FindOptions {
        projection: Some(vec!["name".into()]),
        sort: Some(vec![SortSpec { field: "age".into(), order: Order::Desc }]),
        limit: Some(2),
        skip: Some(0),
    };
    let docs = find_docs(&col, &filter, &opts).unwrap().to_vec();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].data.get_str("name").unwrap(), "bob");
    assert_eq!(docs[1].data.get_str("name").unwrap(), "carol");

    assert_eq!(count_docs(&col, &filter).unwrap(), 2);
}

#[test]
fn in_filter_over_mixed_numeric_widths() {
    let engine = Engine::new();
    let col = engine.create_collection("qtest");
    col.insert_document(Document::new(doc! {"n": 1_i32}));
    col.insert_document(Document::new(doc! {"n": 2_i64}));
    col.insert_document(Document::new(doc! {"n": 3.0}));

    let filter =
        Filter::In { path: "n".into(), values: vec![Bson::Int64(2), Bson::Int64(3)] };
    assert_eq!(count_docs(&col, &filter).unwrap(), 2);
}

#[test]
fn like_against_store_documents() {
    let engine = Engine::new();
    let col = engine.create_collection("recipes");
    col.insert_document(Document::new(doc! {"name": "Chocolate Cake"}));
    col.insert_document(Document::new(doc! {"name": "Bread"}));

    let filter = Filter::Like { path: "name".into(), pattern: "cake".into() };
    let docs = find_docs(&col, &filter, &FindOptions::default()).unwrap().to_vec();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].data.get_str("name").unwrap(), "Chocolate Cake");
}

#[test]
fn cursor_iterates_lazily() {
    let engine = Engine::new();
    let col = engine.create_collection("qtest");
    for i in 0..5_i64 {
        col.insert_document(Document::new(doc! {"i": i}));
    }
    let cur = find_docs(&col, &Filter::True, &FindOptions::default()).unwrap();
    assert_eq!(cur.count(), 5);
}
