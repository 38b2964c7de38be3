use analizador_ingest::{DialectId, ParseError, Pipeline};
use chrono::NaiveDate;

/// Encode a test payload the way the bank exports it: one byte per
/// character, euro as the raw 0x80 byte.
fn latin1(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u32 as u8).collect()
}

#[test]
fn test_simple_export_end_to_end() {
    let payload = b"fecha,concepto,monto\n\
                    2024-01-15,Mercadona compra,-45.30\n\
                    2024-01-16,Netflix suscripcion,-12.99\n";
    let report = Pipeline::default().process(payload).unwrap();

    assert_eq!(report.dialect, DialectId::Simple);
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.transactions.len(), 2);

    let first = &report.transactions[0];
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert_eq!(first.concept, "Mercadona compra");
    assert_eq!(first.amount, -45.30);
    assert_eq!(first.category, "Comida y Supermercado");

    let second = &report.transactions[1];
    assert_eq!(second.date, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
    assert_eq!(second.concept, "Netflix suscripcion");
    assert_eq!(second.amount, -12.99);
    assert_eq!(second.category, "Ocio y Entretenimiento");
}

#[test]
fn test_bank_export_end_to_end() {
    let mut text = String::new();
    text.push_str("Banco Ejemplo S.A.\n");
    text.push_str("Titular: PRUEBA PRUEBA\n");
    text.push_str("Cuenta: ES00 0000 0000 0000\n");
    text.push_str("\n");
    text.push_str("Movimientos\n");
    text.push_str("Desde: 01/01/2024\n");
    text.push_str("Hasta: 31/01/2024\n");
    text.push_str("Fecha operaci\u{f3}n;Concepto;Importe\n");
    text.push_str("15/01/2024;Compra  Mercadona   Valencia;-45,30\u{80}\n");
    text.push_str("20/01/2024;Vuelo Iberia;-1.234,56\u{80}\n");
    text.push_str("31/01/2024;N\u{f3}mina enero;1.800,00\n");

    let report = Pipeline::default().process(&latin1(&text)).unwrap();

    assert_eq!(report.dialect, DialectId::Bank);
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.transactions.len(), 3);

    // Source order is preserved; whitespace runs are collapsed.
    assert_eq!(
        report.transactions[0].concept,
        "Compra Mercadona Valencia"
    );
    assert_eq!(report.transactions[0].amount, -45.30);
    assert_eq!(report.transactions[0].category, "Comida y Supermercado");

    assert_eq!(report.transactions[1].amount, -1234.56);
    assert_eq!(report.transactions[1].category, "Viajes y Transporte");

    assert_eq!(
        report.transactions[2].date,
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    );
    assert_eq!(report.transactions[2].amount, 1800.00);
    assert_eq!(report.transactions[2].category, "Ingresos");
}

#[test]
fn test_bad_rows_surface_as_diagnostics_not_errors() {
    let payload = b"fecha,concepto,monto\n\
                    2024-01-15,Compra uno,-10.00\n\
                    bad-date,Compra dos,-20.00\n\
                    2024-01-17,Compra tres,sin-importe\n\
                    2024-01-18,Compra cuatro,-40.00\n";
    let report = Pipeline::default().process(payload).unwrap();

    assert_eq!(report.transactions.len(), 2);
    assert_eq!(report.diagnostics.len(), 2);
    assert_eq!(report.diagnostics[0].row, 2);
    assert!(report.diagnostics[0].message.contains("bad-date"));
    assert_eq!(report.diagnostics[1].row, 3);
    assert!(report.diagnostics[1].message.contains("sin-importe"));
}

#[test]
fn test_unrecognized_payload_is_rejected_with_the_dialect_list() {
    let err = Pipeline::default()
        .process(b"time|description|value\n09:00|coffee|3.50\n")
        .unwrap_err();
    match err {
        ParseError::UnrecognizedFormat { tried } => {
            assert_eq!(tried, vec!["banco", "simple"]);
        }
        other => panic!("expected UnrecognizedFormat, got {other:?}"),
    }
}

#[test]
fn test_all_rows_bad_is_fatal_with_capped_diagnostics() {
    let mut payload = String::from("fecha,concepto,monto\n");
    for day in 1..=9 {
        payload.push_str(&format!("2024-01-{day:02},Compra,no-num\n"));
    }
    let err = Pipeline::default().process(payload.as_bytes()).unwrap_err();
    match err {
        ParseError::NoValidRows {
            attempted,
            diagnostics,
        } => {
            assert_eq!(attempted, 9);
            assert_eq!(diagnostics.len(), 5);
        }
        other => panic!("expected NoValidRows, got {other:?}"),
    }
}

#[test]
fn test_report_serializes_to_stable_json() {
    let payload = b"fecha,concepto,monto\n2024-01-15,Mercadona compra,-45.30\n";
    let report = Pipeline::default().process(payload).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["dialect"], "simple");
    assert_eq!(json["transactions"][0]["date"], "2024-01-15");
    assert_eq!(json["transactions"][0]["category"], "Comida y Supermercado");
    assert_eq!(json["diagnostics"].as_array().unwrap().len(), 0);
}

#[test]
fn test_pipeline_is_shareable_across_threads() {
    let pipeline = std::sync::Arc::new(Pipeline::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let pipeline = pipeline.clone();
            std::thread::spawn(move || {
                let payload =
                    format!("fecha,concepto,monto\n2024-01-{:02},Compra,-1.00\n", i + 1);
                pipeline.process(payload.as_bytes()).unwrap().transactions
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().len(), 1);
    }
}
