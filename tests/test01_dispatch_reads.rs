mod common;

use common::{book, inventory, text, tool};
use serde_json::json;
use table_dispatch::prelude::*;

#[test]
fn scan_returns_rows_in_insert_order() -> Result<(), Box<dyn std::error::Error>> {
    let inv = inventory();
    let mut api = inv.dispatcher("books");

    let rows = api.get(None, None)?;
    assert_eq!(rows.len(), 8);
    assert_eq!(
        rows.to_values()[..3],
        [
            book("October Revolution", "Y Geronovsky", "history"),
            book("American Wetlands", "Mary Chandler", "geography"),
            book("Monstrous Appetite", "Mark Appleton", "horror"),
        ]
    );
    assert_eq!(rows.column_names(), ["title", "author", "genre"]);
    assert_eq!(rows.rows()[0].get("author"), Some(&text("Y Geronovsky")));
    Ok(())
}

#[test]
fn scan_is_idempotent_without_writes() -> Result<(), Box<dyn std::error::Error>> {
    let inv = inventory();
    let mut api = inv.dispatcher("tools");
    let first = api.get(None, None)?;
    let second = api.get(Some("/scan"), None)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn where_equality_on_text() -> Result<(), Box<dyn std::error::Error>> {
    let inv = inventory();
    let mut api = inv.dispatcher("books");
    let rows = api.get(Some("/where"), Some(&[json!("genre"), json!("technical")]))?;
    assert_eq!(
        rows.to_values(),
        vec![
            book("Glazier Manual", "BC Thompson", "technical"),
            book("Timber Framing & Construction", "Richard Clark", "technical"),
            book("The Handy Gardener", "Susan Bower", "technical"),
        ]
    );
    Ok(())
}

#[test]
fn where_without_enough_items_is_a_shape_error() {
    let inv = inventory();
    let mut api = inv.dispatcher("books");

    let err = api.get(Some("/where"), Some(&[])).unwrap_err();
    assert!(matches!(err, TableDispatchError::Shape(_)));
    assert_eq!(err.to_string(), "Invalid payload - needs to be at least 2 items");

    let err = api.get(Some("/where"), None).unwrap_err();
    assert!(err.to_string().contains("at least 2 items"));
}

#[test]
fn where_injection_is_rejected_before_execution() -> Result<(), Box<dyn std::error::Error>> {
    let inv = inventory();
    let mut api = inv.dispatcher("books");

    let err = api
        .get(
            Some("/where"),
            Some(&[json!("genre = fiction;) DROP TABLE books;"), json!("blank")]),
        )
        .unwrap_err();
    assert!(matches!(err, TableDispatchError::InjectionSuspected(_)));
    assert!(
        err.to_string()
            .starts_with("Invalid payload - looks like injection attempt")
    );
    assert!(err.is_rejection());

    // table untouched
    assert_eq!(api.get(None, None)?.len(), 8);
    Ok(())
}

#[test]
fn where_comparison_keeps_natural_order() -> Result<(), Box<dyn std::error::Error>> {
    let inv = inventory();
    let mut api = inv.dispatcher("tools");

    let gte = api.get(Some("/where"), Some(&[json!("price"), json!(200.00), json!(">=")]))?;
    assert_eq!(
        gte.to_values(),
        vec![
            tool(1, "table saw", "Makita", 267.49, 4),
            tool(15, "combo welder", "Miller", 2400.35, 7),
            tool(16, "welding hood", "Esab", 333.99, 12),
            tool(18, "plasma cutter", "Lincoln", 1119.68, 2),
        ]
    );

    let lte = api.get(Some("/where"), Some(&[json!("price"), json!(28.00), json!("<=")]))?;
    assert_eq!(
        lte.to_values(),
        vec![
            tool(5, "garden shears", "Fiskars", 24.39, 4),
            tool(8, "brick trowel", "Marshalltown", 26.43, 4),
            tool(11, "1 lb plastic mallet", "ABC", 19.23, 6),
            tool(12, "15-piece brass and steel punch set", "Wheeler", 27.99, 6),
            tool(13, "carpenter hammer", "Craftsman", 13.98, 18),
        ]
    );
    Ok(())
}

#[test]
fn where_fine_projects_and_orders() -> Result<(), Box<dyn std::error::Error>> {
    let inv = inventory();
    let mut api = inv.dispatcher("tools");

    let asc = api.get(
        Some("/where"),
        Some(&[
            json!("price"),
            json!(28.00),
            json!(["id", "type", "count"]),
            json!("<="),
            json!(true),
        ]),
    )?;
    let expected = vec![
        vec![RowValues::Int(13), text("carpenter hammer"), RowValues::Int(18)],
        vec![RowValues::Int(11), text("1 lb plastic mallet"), RowValues::Int(6)],
        vec![RowValues::Int(5), text("garden shears"), RowValues::Int(4)],
        vec![RowValues::Int(8), text("brick trowel"), RowValues::Int(4)],
        vec![
            RowValues::Int(12),
            text("15-piece brass and steel punch set"),
            RowValues::Int(6),
        ],
    ];
    assert_eq!(asc.to_values(), expected);
    assert_eq!(asc.column_names(), ["id", "type", "count"]);

    // four items: ascending by default
    let default_order = api.get(
        Some("/where"),
        Some(&[json!("price"), json!(28.00), json!(["id", "type", "count"]), json!("<=")]),
    )?;
    assert_eq!(default_order, asc);

    let desc = api.get(
        Some("/where"),
        Some(&[
            json!("price"),
            json!(28.00),
            json!(["id", "type", "count"]),
            json!("<="),
            json!(false),
        ]),
    )?;
    let mut reversed = expected;
    reversed.reverse();
    assert_eq!(desc.to_values(), reversed);
    Ok(())
}

#[test]
fn where_length_matches_accessor_call() -> Result<(), Box<dyn std::error::Error>> {
    let inv = inventory();
    let mut api = inv.dispatcher("tools");

    let two = api.get(Some("/where"), Some(&[json!("brand"), json!("Bosch")]))?;
    let direct = api
        .store()
        .filter_where_query("brand", &text("Bosch"), Comparator::Eq)?;
    assert_eq!(two, direct);
    assert_eq!(two.len(), 2);

    for cmp in Comparator::ALL {
        let via_route = api.get(
            Some("/where"),
            Some(&[json!("count"), json!(5), json!(cmp.as_sql())]),
        )?;
        let direct = api
            .store()
            .filter_where_query("count", &RowValues::Int(5), cmp)?;
        assert_eq!(via_route, direct, "comparator {cmp}");
    }
    Ok(())
}

#[test]
fn every_comparator_reaches_the_projected_filter() -> Result<(), Box<dyn std::error::Error>> {
    let inv = inventory();
    let mut api = inv.dispatcher("tools");

    for cmp in Comparator::ALL {
        let via_route = api.get(
            Some("/where"),
            Some(&[json!("count"), json!(5), json!(["id"]), json!(cmp.as_sql()), json!(true)]),
        )?;
        let direct = inv
            .store("tools")
            .filter_fine_query("count", &RowValues::Int(5), &["id"], cmp, true)?;
        assert_eq!(via_route, direct, "comparator {cmp}");
        assert_eq!(via_route.column_names(), ["id"]);
    }
    Ok(())
}

#[test]
fn comparator_outside_allow_list_never_reaches_engine() {
    let inv = inventory();
    let mut api = inv.dispatcher("tools");
    for bad in ["==", "<>", "LIKE", "= 1 OR 1 =", "IS"] {
        let err = api
            .get(Some("/where"), Some(&[json!("price"), json!(1), json!(bad)]))
            .unwrap_err();
        assert!(matches!(err, TableDispatchError::Shape(_)), "{bad}");

        let err = api
            .get(
                Some("/where"),
                Some(&[json!("price"), json!(1), json!(["id"]), json!(bad)]),
            )
            .unwrap_err();
        assert!(matches!(err, TableDispatchError::Shape(_)), "{bad}");
    }
}

#[test]
fn describe_lists_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let inv = inventory();
    let mut api = inv.dispatcher("books");

    for route in ["/describe", "/table"] {
        let catalog = api.get(Some(route), None)?;
        let mut tables: Vec<&str> = catalog
            .iter()
            .filter(|row| row.get("type").and_then(RowValues::as_text) == Some("table"))
            .filter_map(|row| row.get("name").and_then(RowValues::as_text))
            .collect();
        tables.sort_unstable();
        assert_eq!(tables, ["books", "machines", "tools"]);
    }
    Ok(())
}

#[test]
fn column_and_order_routes() -> Result<(), Box<dyn std::error::Error>> {
    let inv = inventory();
    let mut api = inv.dispatcher("machines");

    let names = api.get(Some("/column"), Some(&[json!("name")]))?;
    assert_eq!(names.column_names(), ["name"]);
    assert_eq!(names.len(), 5);
    assert_eq!(names.rows()[0].get_by_index(0), Some(&text("lathe")));

    let by_price = api.get(Some("/order"), Some(&[json!("price"), json!(["name", "brand"])]))?;
    assert_eq!(
        by_price.rows()[0].values,
        vec![text("CNC router"), text("Shark")]
    );

    let cheapest_first = api.get(
        Some("/order"),
        Some(&[json!("price"), json!(["name", "brand"]), json!(true)]),
    )?;
    assert_eq!(
        cheapest_first.rows()[0].values,
        vec![text("angle grinder"), text("Black & Decker")]
    );
    Ok(())
}

#[test]
fn unknown_routes_are_explicit_errors() {
    let inv = inventory();
    let mut api = inv.dispatcher("books");
    let err = api.get(Some("/everything"), None).unwrap_err();
    assert!(matches!(err, TableDispatchError::UndefinedRoute(_)));
    let err = api.get(Some("/update"), None).unwrap_err();
    assert!(matches!(err, TableDispatchError::UndefinedRoute(_)));
}
