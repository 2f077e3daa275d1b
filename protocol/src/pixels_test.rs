use super::*;

const ADDR: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

fn update(x: i32, y: i32) -> PixelUpdate {
    PixelUpdate { x, y, image: "data:image/png;base64,AAAA".to_owned() }
}

// =============================================================================
// PixelRecord
// =============================================================================

#[test]
fn decodes_list_entry() {
    let text = r#"{"x":1,"y":2,"current_owner":"0xAbC","uri":"ipfs://x","timestamp":"2024-01-01"}"#;
    let pixel: PixelRecord = serde_json::from_str(text).expect("decode");
    assert_eq!((pixel.x, pixel.y), (1, 2));
    assert_eq!(pixel.owner_address(), Some("0xAbC"));
    assert_eq!(pixel.updated_at(), Some(&Timestamp::Text("2024-01-01".to_owned())));
    assert!(pixel.metadata.is_none());
}

#[test]
fn decodes_single_pixel_spelling() {
    let text = r##"{"x":4,"y":5,"owner":"0xabc","color":"#ff0000","lastUpdated":"t","metadata":{"name":"moon"}}"##;
    let pixel: PixelRecord = serde_json::from_str(text).expect("decode");
    assert_eq!(pixel.owner_address(), Some("0xabc"));
    assert_eq!(pixel.updated_at(), Some(&Timestamp::Text("t".to_owned())));
    assert_eq!(pixel.metadata.expect("metadata")["name"], "moon");
}

#[test]
fn numeric_timestamp_decodes_as_millis() {
    let text = r#"[{"x":1,"y":2,"current_owner":"0x11","uri":null,"timestamp":1700000000000}]"#;
    let pixels: Vec<PixelRecord> = serde_json::from_str(text).expect("decode");
    assert_eq!(pixels[0].updated_at().and_then(Timestamp::as_millis), Some(1_700_000_000_000));
}

#[test]
fn fractional_timestamp_truncates_to_millis() {
    let pixel: PixelRecord = serde_json::from_str(r#"{"x":0,"y":0,"timestamp":1700000000000.7}"#).expect("decode");
    assert_eq!(pixel.updated_at().and_then(Timestamp::as_millis), Some(1_700_000_000_000));
}

#[test]
fn both_owner_spellings_prefer_current_owner() {
    let text = r#"{"x":0,"y":0,"owner":"0xold","current_owner":"0xnew","timestamp":"a","lastUpdated":"b"}"#;
    let pixel: PixelRecord = serde_json::from_str(text).expect("decode");
    assert_eq!(pixel.owner_address(), Some("0xnew"));
    assert_eq!(pixel.updated_at(), Some(&Timestamp::Text("a".to_owned())));
}

#[test]
fn owner_spelling_alone_is_used() {
    let pixel: PixelRecord = serde_json::from_str(r#"{"x":0,"y":0,"owner":"0xABC"}"#).expect("decode");
    assert!(pixel.is_owned_by("0xabc"));
}

#[test]
fn bad_rows_are_dropped_from_the_list() {
    let rows: Vec<Value> = serde_json::from_str(
        r#"[{"x":1,"y":1,"current_owner":"0xa"},{"x":"two","y":2},{"y":3},{"x":4,"y":4,"timestamp":17}]"#,
    )
    .expect("decode");
    let (records, dropped) = records_from_values(rows);
    assert_eq!(dropped, 2);
    assert_eq!(records.iter().map(|p| p.x).collect::<Vec<_>>(), vec![1, 4]);
}

#[test]
fn ownership_check_ignores_case() {
    let pixel: PixelRecord = serde_json::from_str(r#"{"x":0,"y":0,"current_owner":"0xABC"}"#).expect("decode");
    assert!(pixel.is_owned_by("0xabc"));
    assert!(!pixel.is_owned_by("0xdef"));
}

#[test]
fn unowned_pixel_is_owned_by_nobody() {
    let pixel: PixelRecord = serde_json::from_str(r#"{"x":0,"y":0}"#).expect("decode");
    assert!(!pixel.is_owned_by("0xabc"));
}

// =============================================================================
// UpdateRequest
// =============================================================================

#[test]
fn single_update_serializes_as_one_element_batch() {
    let json = serde_json::to_value(UpdateRequest::single(ADDR, update(3, 4))).expect("encode");
    assert_eq!(json["address"], ADDR);
    assert_eq!(json["pixels"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["pixels"][0]["x"], 3);
}

#[test]
fn valid_request_passes() {
    assert_eq!(UpdateRequest::single(ADDR, update(0, 0)).validate(), Ok(()));
}

#[test]
fn invalid_address_is_rejected() {
    let req = UpdateRequest::single("0x123", update(0, 0));
    assert_eq!(req.validate(), Err(UpdateRequestError::InvalidAddress));
}

#[test]
fn empty_pixels_are_rejected() {
    let req = UpdateRequest { address: ADDR.to_owned(), pixels: Vec::new() };
    assert_eq!(req.validate(), Err(UpdateRequestError::NoPixels));
}

#[test]
fn missing_image_is_rejected() {
    let mut px = update(0, 0);
    px.image.clear();
    assert_eq!(UpdateRequest::single(ADDR, px).validate(), Err(UpdateRequestError::MissingImage));
}

// =============================================================================
// SingleUpdateRequest
// =============================================================================

#[test]
fn colour_update_serializes_flat_body_with_metadata() {
    let req = SingleUpdateRequest::with_color(ADDR, 7, 8, "data:image/png;base64,AAAA".to_owned(), "#ff0000");
    let json = serde_json::to_value(&req).expect("encode");
    assert_eq!(json["address"], ADDR);
    assert_eq!((json["x"].as_i64(), json["y"].as_i64()), (Some(7), Some(8)));
    assert_eq!(json["metadata"]["color"], "#ff0000");
    assert!(json.get("pixels").is_none());
    assert_eq!(req.validate(), Ok(()));
}

#[test]
fn single_update_without_metadata_omits_the_key() {
    let req = SingleUpdateRequest { address: ADDR.to_owned(), x: 0, y: 0, image: "data:x".to_owned(), metadata: None };
    let json = serde_json::to_value(&req).expect("encode");
    assert!(json.get("metadata").is_none());
}

#[test]
fn single_update_rejects_bad_address_coordinates_and_image() {
    let ok = SingleUpdateRequest::with_color(ADDR, 1, 1, "data:x".to_owned(), "#000000");
    let bad_address = SingleUpdateRequest { address: "nope".to_owned(), ..ok.clone() };
    assert_eq!(bad_address.validate(), Err(UpdateRequestError::InvalidAddress));
    let negative = SingleUpdateRequest { x: -1, ..ok.clone() };
    assert_eq!(negative.validate(), Err(UpdateRequestError::InvalidCoordinates));
    let no_image = SingleUpdateRequest { image: String::new(), ..ok };
    assert_eq!(no_image.validate(), Err(UpdateRequestError::MissingImage));
}
