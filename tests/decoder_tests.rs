mod common;

use common::LogFileBuilder;
use logysis::decoder::{decode_array, decode_records, decode_scalar};
use logysis::header::parse_header;
use logysis::logfile::LogFile;
use logysis::{ArrayType, DecodeError, Error, Record, ScalarType, Value};

fn decode(text: &str) -> logysis::Result<Vec<Record>> {
    let log = LogFile::from_text(text);
    let fields = parse_header(log.lines(), false)?;
    decode_records(&log, &fields)
}

// ============================================================================
// SCALAR TESTS
// ============================================================================

#[test]
fn test_int_values() {
    assert_eq!(decode_scalar("5", ScalarType::Int).unwrap(), Value::Int(5));
    assert_eq!(decode_scalar("-17", ScalarType::Int).unwrap(), Value::Int(-17));
    assert!(matches!(
        decode_scalar("5.0", ScalarType::Int),
        Err(DecodeError::InvalidInt { .. })
    ));
    assert!(matches!(
        decode_scalar("five", ScalarType::Int),
        Err(DecodeError::InvalidInt { .. })
    ));
}

#[test]
fn test_float_values() {
    assert_eq!(
        decode_scalar("2.5", ScalarType::Float).unwrap(),
        Value::Float(2.5)
    );
    assert_eq!(
        decode_scalar("1e3", ScalarType::Float).unwrap(),
        Value::Float(1000.0)
    );
    assert!(matches!(
        decode_scalar("", ScalarType::Float),
        Err(DecodeError::InvalidFloat { .. })
    ));
}

#[test]
fn test_str_is_verbatim() {
    assert_eq!(
        decode_scalar(" a, b; c ", ScalarType::Str).unwrap(),
        Value::Str(" a, b; c ".to_string())
    );
    assert_eq!(
        decode_scalar("", ScalarType::Str).unwrap(),
        Value::Str(String::new())
    );
}

#[test]
fn test_bool_values() {
    assert_eq!(
        decode_scalar("1", ScalarType::Bool).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        decode_scalar("0", ScalarType::Bool).unwrap(),
        Value::Bool(false)
    );
    for literal in ["true", "2", "", "01"] {
        assert!(matches!(
            decode_scalar(literal, ScalarType::Bool),
            Err(DecodeError::InvalidBool(_))
        ));
    }
}

// ============================================================================
// ARRAY TESTS
// ============================================================================

#[test]
fn test_array_shape_matches_declaration() {
    let value = decode_array("2x3x2,1,2,3,4,5,6,7,8,9,10,11,12", ArrayType::Float32).unwrap();
    assert_eq!(value.shape(), Some(&[2, 3, 2][..]));

    let array = value.as_float32_array().unwrap();
    assert_eq!(array[[0, 0, 0]], 1.0);
    assert_eq!(array[[0, 2, 1]], 6.0);
    assert_eq!(array[[1, 0, 0]], 7.0);
    assert_eq!(array[[1, 2, 1]], 12.0);
}

#[test]
fn test_one_dimensional_array() {
    let value = decode_array("4,0.5,1.5,2.5,3.5", ArrayType::Float32).unwrap();
    assert_eq!(value.shape(), Some(&[4][..]));
    let array = value.as_float32_array().unwrap();
    assert_eq!(array.iter().copied().collect::<Vec<_>>(), vec![0.5, 1.5, 2.5, 3.5]);
}

#[test]
fn test_array_spaces_and_trailing_delimiter() {
    let value = decode_array(" 2 x 2 ; 1 ,2; 3, 4 ;", ArrayType::Float32).unwrap();
    assert_eq!(value.shape(), Some(&[2, 2][..]));
    assert_eq!(value.as_float32_array().unwrap()[[1, 1]], 4.0);
}

#[test]
fn test_uint8_narrowing() {
    let value = decode_array("1x5,0,1.9,255,256,-1", ArrayType::Uint8).unwrap();
    let array = value.as_uint8_array().unwrap();
    assert_eq!(array.iter().copied().collect::<Vec<_>>(), vec![0, 1, 255, 0, 255]);
}

#[test]
fn test_float32_cast() {
    let value = decode_array("1,0.1", ArrayType::Float32).unwrap();
    assert_eq!(value.as_float32_array().unwrap()[[0]], 0.1f32);
}

#[test]
fn test_zero_sized_array() {
    let value = decode_array("0x3", ArrayType::Uint8).unwrap();
    assert_eq!(value.shape(), Some(&[0, 3][..]));
}

#[test]
fn test_element_count_mismatch() {
    match decode_array("2x2,1,2,3", ArrayType::Float32) {
        Err(DecodeError::ShapeMismatch {
            shape,
            expected,
            found,
        }) => {
            assert_eq!(shape, vec![2, 2]);
            assert_eq!(expected, 4);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(matches!(
        decode_array("2,1,2,3", ArrayType::Uint8),
        Err(DecodeError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_bad_shape_spec() {
    for line in ["2by2,1,2,3,4", "x2,1,2", "", ",1,2"] {
        assert!(
            matches!(
                decode_array(line, ArrayType::Float32),
                Err(DecodeError::InvalidShape(_))
            ),
            "line {:?}",
            line
        );
    }
}

#[test]
fn test_bad_element() {
    assert!(matches!(
        decode_array("2,1,abc", ArrayType::Float32),
        Err(DecodeError::InvalidFloat { .. })
    ));
}

// ============================================================================
// RECORD TESTS
// ============================================================================

#[test]
fn test_end_to_end_sample() {
    let records = decode("###\na,val,int\nb,csv,float32\n###\n---\n5\n2x2,1,2,3,4\n---\n").unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("a"), Some(&Value::Int(5)));

    let b = records[0].get("b").unwrap().as_float32_array().unwrap();
    assert_eq!(b.shape(), &[2, 2]);
    assert_eq!(b.iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_record_count_is_sentinels_minus_one() {
    for records in 1..5 {
        let mut builder = LogFileBuilder::new().header(&[("n", "val", "int")]);
        for i in 0..records {
            let value = i.to_string();
            builder = builder.record(&[value.as_str()]);
        }
        let decoded = decode(&builder.finish().build()).unwrap();
        assert_eq!(decoded.len(), records);
        assert_eq!(decoded.last().unwrap().get("n"), Some(&Value::Int(records as i64 - 1)));
    }
}

#[test]
fn test_data_lines_follow_declaration_order() {
    let text = LogFileBuilder::new()
        .header(&[("zeta", "val", "str"), ("alpha", "val", "str")])
        .record(&["first", "second"])
        .finish()
        .build();

    let records = decode(&text).unwrap();
    assert_eq!(records[0].get("zeta").unwrap().as_str(), Some("first"));
    assert_eq!(records[0].get("alpha").unwrap().as_str(), Some("second"));
    assert_eq!(records[0].names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
}

#[test]
fn test_lines_between_blocks_are_ignored() {
    let text = LogFileBuilder::new()
        .header(&[("ok", "val", "bool")])
        .line("free text before the first record")
        .record(&["1", "trailing note"])
        .record(&["0"])
        .finish()
        .build();

    let records = decode(&text).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("ok").unwrap().as_bool(), Some(true));
    assert_eq!(records[1].get("ok").unwrap().as_bool(), Some(false));
}

#[test]
fn test_duplicate_field_name_last_wins() {
    let text = LogFileBuilder::new()
        .header(&[("v", "val", "int"), ("v", "val", "str")])
        .record(&["7", "seven"])
        .finish()
        .build();

    let records = decode(&text).unwrap();
    assert_eq!(records[0].len(), 1);
    assert_eq!(records[0].get("v").unwrap().as_str(), Some("seven"));
}

#[test]
fn test_field_error_identifies_record_and_field() {
    let text = LogFileBuilder::new()
        .header(&[("n", "val", "int"), ("flag", "val", "bool")])
        .record(&["1", "1"])
        .record(&["2", "yes"])
        .finish()
        .build();

    match decode(&text) {
        Err(Error::FieldDecode {
            record,
            field,
            source,
        }) => {
            assert_eq!(record, 1);
            assert_eq!(field, "flag");
            assert!(matches!(source, DecodeError::InvalidBool(ref v) if v == "yes"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_missing_data_line() {
    let text = "###\na,val,int\nb,val,int\n###\n---\n1\n---";

    match decode(text) {
        Err(Error::FieldDecode { field, source, .. }) => {
            // Field "b" reads the terminal sentinel, which is not an integer
            assert_eq!(field, "b");
            assert!(matches!(source, DecodeError::InvalidInt { .. }));
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let text = "###\na,val,str\nb,val,str\nc,val,str\n###\n---\n1\n---";
    match decode(text) {
        Err(Error::FieldDecode { field, source, .. }) => {
            assert_eq!(field, "c");
            assert!(matches!(source, DecodeError::MissingLine { .. }));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_boundary_underflow() {
    let text = LogFileBuilder::new()
        .header(&[("a", "val", "int")])
        .line("---")
        .line("1")
        .build();

    assert!(matches!(
        decode(&text),
        Err(Error::BoundaryUnderflow { found: 1 })
    ));

    let text = LogFileBuilder::new().header(&[("a", "val", "int")]).build();
    assert!(matches!(
        decode(&text),
        Err(Error::BoundaryUnderflow { found: 0 })
    ));
}

#[test]
fn test_records_serialize_in_field_order() {
    let text = LogFileBuilder::new()
        .header(&[
            ("step", "val", "int"),
            ("name", "val", "str"),
            ("pts", "csv", "uint8"),
        ])
        .record(&["3", "cam0", "2x2,1,2,3,4"])
        .finish()
        .build();

    let records = decode(&text).unwrap();
    let json = serde_json::to_string(&records).unwrap();
    assert_eq!(json, r#"[{"step":3,"name":"cam0","pts":[[1,2],[3,4]]}]"#);
}
