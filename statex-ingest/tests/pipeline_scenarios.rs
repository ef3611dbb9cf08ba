use rust_decimal::Decimal;
use statex_core::{Currency, DecryptionError, ExtractError, Money};
use statex_ingest::{
    PipelineError, PlainTextSource, Profile, TextLayout, TextSource, parse_transactions, run_pipeline,
};
use std::cell::Cell;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Password-protected source that counts successful extractions.
struct LockedSource {
    password: &'static str,
    text: &'static str,
    layout: TextLayout,
    unlocked: Cell<usize>,
}

impl LockedSource {
    fn new(password: &'static str, text: &'static str, layout: TextLayout) -> Self {
        Self {
            password,
            text,
            layout,
            unlocked: Cell::new(0),
        }
    }
}

impl TextSource for LockedSource {
    fn extract(&self, _bytes: &[u8], password: Option<&str>) -> Result<String, ExtractError> {
        match password {
            None | Some("") => Err(DecryptionError::NoPasswordGiven.into()),
            Some(pw) if pw != self.password => Err(DecryptionError::WrongPassword.into()),
            Some(_) => {
                self.unlocked.set(self.unlocked.get() + 1);
                Ok(self.text.to_string())
            }
        }
    }

    fn layout(&self) -> TextLayout {
        self.layout
    }

    fn name(&self) -> &'static str {
        "locked"
    }
}

const COUNTRY_TEXT: &str = "\
BANCO - ESTADO DE CUENTA                         Pagina 1
FECHA  FECHA   DESCRIPCION                 PAIS TIPO   MONTO
15Jan16Jan  COFFEE SHOP LIMA   PE CONSUMO  45.50
16Jan 17Jan NETFLIX.COM US CONSUMO 44.90
20Jan 20Jan PAGO BANCA MOVIL PE PAGO 500.00
21Jan 22Jan UNKNOWN ROW WITH NO AMOUNT PE CONSUMO
22Jan 23Jan REFUND TIENDA PE CONSUMO -45.50
";

#[test]
fn scenario_a_country_column_line() {
    let out = parse_transactions("15Jan16Jan  COFFEE SHOP LIMA   PE CONSUMO  45.50", &Profile::country_column()).unwrap();
    assert_eq!(out.records.len(), 1);

    let r = &out.records[0];
    assert_eq!(r.posting_date, "15Jan");
    assert_eq!(r.transaction_date, "16Jan");
    assert_eq!(r.description, "COFFEE SHOP LIMA");
    assert_eq!(r.country_code.as_deref(), Some("PE"));
    assert_eq!(r.operation_type, "CONSUMO");
    assert_eq!(r.amount, dec("45.50"));
}

#[test]
fn scenario_b_fixed_width_line() {
    let line = format!(
        "{:<5}{:<9}{:<49}{:<17}{:>15}",
        "15Ene", "16Ene", "SAGA FALABELLA", "CONSUMO", "1,250.00"
    );
    let line = format!("{line} ");
    assert!(line.chars().count() >= 96);

    let out = parse_transactions(&line, &Profile::fixed_columns()).unwrap();
    assert_eq!(out.records.len(), 1);

    let r = &out.records[0];
    assert_eq!(r.amount, dec("1250.00"));
    assert_eq!(r.currency, Currency::Pen);
    assert_eq!(r.secondary, Some(Money::new(Currency::Usd, Decimal::ZERO)));
}

#[test]
fn scenario_c_wrong_password_produces_nothing() {
    let source = LockedSource::new("1234", COUNTRY_TEXT, TextLayout::Flowing);

    let err = run_pipeline(&source, b"%PDF", Some("9999"), &Profile::country_column()).unwrap_err();
    assert!(matches!(err, PipelineError::Decryption(DecryptionError::WrongPassword)));

    let err = run_pipeline(&source, b"%PDF", None, &Profile::country_column()).unwrap_err();
    assert!(matches!(err, PipelineError::Decryption(DecryptionError::NoPasswordGiven)));
    assert_eq!(source.unlocked.get(), 0);

    let out = run_pipeline(&source, b"%PDF", Some("1234"), &Profile::country_column()).unwrap();
    assert_eq!(out.records.len(), 3);
    assert_eq!(source.unlocked.get(), 1);
}

#[test]
fn scenario_e_empty_document_is_a_distinct_outcome() {
    let source = PlainTextSource::new(TextLayout::Flowing);
    let err = run_pipeline(&source, b"", None, &Profile::country_column()).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyResult { candidates: 0, misses: 0 }));
    assert!(err.to_string().contains("check the password or file format"));
}

#[test]
fn all_misses_is_still_empty_result() {
    let source = PlainTextSource::new(TextLayout::Flowing);
    let text = b"15Jan 16Jan SOMETHING ODD\n17Jan 17Jan ANOTHER ONE 12\n";
    let err = run_pipeline(&source, text, None, &Profile::country_column()).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyResult { candidates: 2, misses: 2 }));
}

#[test]
fn positional_profile_needs_layout_preserving_source() {
    let source = PlainTextSource::new(TextLayout::Flowing);
    let err = run_pipeline(&source, b"15Ene16Ene X", None, &Profile::fixed_columns()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::LayoutUnavailable {
            required: TextLayout::FixedColumns,
            actual: TextLayout::Flowing,
            ..
        }
    ));
}

#[test]
fn country_statement_yield_and_counters() {
    let out = parse_transactions(COUNTRY_TEXT, &Profile::country_column()).unwrap();

    let descriptions: Vec<_> = out.records.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(descriptions, vec!["COFFEE SHOP LIMA", "NETFLIX.COM", "REFUND TIENDA"]);
    assert_eq!(out.records[2].amount, dec("-45.50"));

    // header rows fail the date shape, the PAGO row is excluded by marker
    assert_eq!(out.candidates, 4);
    assert_eq!(out.misses, 1);
}

#[test]
fn every_valid_line_yields_exactly_one_record() {
    let rows = [
        ("01Feb", "02Feb", "WONG", "PE", "CONSUMO", "1,000.00", "1000.00"),
        ("03Feb", "03Feb", "SPOTIFY  AB", "SE", "SERVICIO", "19.90", "19.90"),
        ("04Feb", "05Feb", "HOTEL EL PUEBLO", "PE", "CONSUMO", "12,345,678.09", "12345678.09"),
        ("06Feb", "06Feb", "DEVOLUCION", "PE", "CONSUMO", "-7.00", "-7.00"),
    ];

    for (post, trans, desc, country, op, raw, expected) in rows {
        let line = format!("{post} {trans}   {desc}    {country} {op}   {raw}   ");
        let out = parse_transactions(&line, &Profile::country_column()).unwrap();
        assert_eq!(out.records.len(), 1, "line: {line}");

        let r = &out.records[0];
        assert_eq!(r.posting_date, post);
        assert_eq!(r.transaction_date, trans);
        assert_eq!(r.description, desc);
        assert_eq!(r.country_code.as_deref(), Some(country));
        assert_eq!(r.operation_type, op);
        assert_eq!(r.amount, dec(expected));
    }
}

#[test]
fn non_transaction_text_has_no_candidates() {
    let text = "Resumen del periodo\nSaldo anterior   1,200.00\nTOTAL CONSUMOS 45.50\n  15Jan indented\n";
    for profile in Profile::builtin() {
        let out = parse_transactions(text, &profile).unwrap();
        assert_eq!(out.candidates, 0, "profile {}", profile.name);
        assert!(out.records.is_empty());
    }
}

#[test]
fn parsing_is_idempotent() {
    let profile = Profile::country_column();
    let first = parse_transactions(COUNTRY_TEXT, &profile).unwrap();
    let second = parse_transactions(COUNTRY_TEXT, &profile).unwrap();
    assert_eq!(first, second);
}

#[test]
fn trailing_label_statement() {
    let text = "\
05Mar 06Mar AMAZON MKTPLACE CONSUMO USD 19.99
07Mar 07Mar PLAZA VEA CONSUMO 89.90
08Mar 08Mar PAGO RECIBIDO PAGO -200.00
";
    let out = parse_transactions(text, &Profile::trailing_label()).unwrap();
    let currencies: Vec<_> = out.records.iter().map(|r| r.currency).collect();
    assert_eq!(currencies, vec![Currency::Usd, Currency::Pen, Currency::Pen]);
    assert_eq!(out.records[2].operation_type, "PAGO");
}
