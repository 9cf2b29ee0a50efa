//! Photo Metadata
//!
//! Reads the GPS position embedded in an image's EXIF block.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use exif::{Exif, In, Reader, Tag, Value};

use crate::error::MetadataError;
use crate::models::GpsCoordinates;

/// GPS position of a `data:<mime>;base64,<payload>` image
pub fn extract_gps(data_url: &str) -> Result<GpsCoordinates, MetadataError> {
    let bytes = decode_data_url(data_url)?;
    read_gps(&bytes)
}

pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, MetadataError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or(MetadataError::InvalidDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(MetadataError::InvalidDataUrl)?;
    if !header.split(';').any(|part| part.eq_ignore_ascii_case("base64")) {
        return Err(MetadataError::InvalidDataUrl);
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| MetadataError::Decode(e.to_string()))
}

/// GPS position from raw image bytes (JPEG, TIFF, PNG, HEIF or WebP)
pub fn read_gps(bytes: &[u8]) -> Result<GpsCoordinates, MetadataError> {
    let exif = Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .map_err(|e| match e {
            // No EXIF block at all
            exif::Error::NotFound(_) => MetadataError::NoGpsData,
            other => MetadataError::Exif(other.to_string()),
        })?;

    let latitude = coordinate(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef)?;
    let longitude = coordinate(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef)?;
    Ok(GpsCoordinates { latitude, longitude })
}

fn coordinate(exif: &Exif, value_tag: Tag, ref_tag: Tag) -> Result<f64, MetadataError> {
    let field = exif
        .get_field(value_tag, In::PRIMARY)
        .ok_or(MetadataError::NoGpsData)?;
    let parts: Vec<f64> = match &field.value {
        Value::Rational(parts) => parts.iter().map(|r| r.to_f64()).collect(),
        Value::SRational(parts) => parts.iter().map(|r| r.to_f64()).collect(),
        _ => return Err(MetadataError::Exif(format!("unexpected value type for {}", value_tag))),
    };
    let degrees = dms_to_degrees(&parts)
        .ok_or_else(|| MetadataError::Exif(format!("malformed {}", value_tag)))?;

    let reference = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(|field| match &field.value {
            Value::Ascii(values) => values.first().map(|v| String::from_utf8_lossy(v).trim().to_string()),
            _ => None,
        });
    Ok(apply_reference(degrees, reference.as_deref()))
}

/// Degrees, minutes, seconds to decimal degrees. Minutes and seconds may be omitted.
pub fn dms_to_degrees(parts: &[f64]) -> Option<f64> {
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    let scales = [1.0, 60.0, 3600.0];
    let degrees: f64 = parts.iter().zip(scales).map(|(part, scale)| part / scale).sum();
    degrees.is_finite().then_some(degrees)
}

/// South and west references make the value negative. A missing reference counts as N/E.
pub fn apply_reference(degrees: f64, reference: Option<&str>) -> f64 {
    match reference {
        Some(r) if r.eq_ignore_ascii_case("S") || r.eq_ignore_ascii_case("W") => -degrees.abs(),
        _ => degrees,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Minimal EXIF payloads built by hand.

    use base64::{engine::general_purpose::STANDARD, Engine as _};

    const GPS_INFO_POINTER: u16 = 0x8825;
    const TYPE_ASCII: u16 = 2;
    const TYPE_LONG: u16 = 4;
    const TYPE_RATIONAL: u16 = 5;

    pub enum GpsEntry {
        /// Tag and NUL-terminated text of at most 4 bytes
        Ascii(u16, &'static [u8]),
        Rationals(u16, Vec<(u32, u32)>),
    }

    pub const LAT_REF: u16 = 1;
    pub const LAT: u16 = 2;
    pub const LON_REF: u16 = 3;
    pub const LON: u16 = 4;

    fn push_entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: [u8; 4]) {
        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&kind.to_le_bytes());
        out.extend_from_slice(&count.to_le_bytes());
        out.extend_from_slice(&value);
    }

    /// Little-endian TIFF whose IFD0 only points at a GPS IFD holding `entries`
    pub fn gps_tiff(entries: &[GpsEntry]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"II");
        out.extend_from_slice(&42u16.to_le_bytes());
        out.extend_from_slice(&8u32.to_le_bytes());

        let gps_ifd_offset: u32 = 8 + 2 + 12 + 4;
        out.extend_from_slice(&1u16.to_le_bytes());
        push_entry(&mut out, GPS_INFO_POINTER, TYPE_LONG, 1, gps_ifd_offset.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        let count = entries.len() as u32;
        let mut data_offset = gps_ifd_offset + 2 + 12 * count + 4;
        let mut data = Vec::new();
        out.extend_from_slice(&(count as u16).to_le_bytes());
        for entry in entries {
            match entry {
                GpsEntry::Ascii(tag, text) => {
                    let mut inline = [0u8; 4];
                    inline[..text.len()].copy_from_slice(text);
                    push_entry(&mut out, *tag, TYPE_ASCII, text.len() as u32, inline);
                }
                GpsEntry::Rationals(tag, values) => {
                    push_entry(&mut out, *tag, TYPE_RATIONAL, values.len() as u32, data_offset.to_le_bytes());
                    for (num, den) in values {
                        data.extend_from_slice(&num.to_le_bytes());
                        data.extend_from_slice(&den.to_le_bytes());
                    }
                    data_offset += 8 * values.len() as u32;
                }
            }
        }
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&data);
        out
    }

    /// JPEG with the TIFF payload in an APP1 Exif segment
    pub fn wrap_in_jpeg(tiff: &[u8]) -> Vec<u8> {
        let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
        let len = (2 + 6 + tiff.len()) as u16;
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend_from_slice(tiff);
        out.extend_from_slice(&[0xFF, 0xD9]);
        out
    }

    pub fn data_url(mime: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
    }

    /// Sydney Opera House: 33°51'25.2"S 151°12'54"E
    pub fn sydney_jpeg_data_url() -> String {
        let tiff = gps_tiff(&[
            GpsEntry::Ascii(LAT_REF, b"S\0"),
            GpsEntry::Rationals(LAT, vec![(33, 1), (51, 1), (252, 10)]),
            GpsEntry::Ascii(LON_REF, b"E\0"),
            GpsEntry::Rationals(LON, vec![(151, 1), (12, 1), (54, 1)]),
        ]);
        data_url("image/jpeg", &wrap_in_jpeg(&tiff))
    }

    /// Valid JPEG with no EXIF segment
    pub fn plain_jpeg_data_url() -> String {
        data_url("image/jpeg", &[0xFF, 0xD8, 0xFF, 0xD9])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-6, "{} != {}", actual, expected);
    }

    #[test]
    fn test_extracts_south_east_from_jpeg() {
        let coords = extract_gps(&sydney_jpeg_data_url()).unwrap();
        assert_close(coords.latitude, -(33.0 + 51.0 / 60.0 + 25.2 / 3600.0));
        assert_close(coords.longitude, 151.0 + 12.0 / 60.0 + 54.0 / 3600.0);
    }

    #[test]
    fn test_extracts_north_west_from_tiff() {
        let tiff = gps_tiff(&[
            GpsEntry::Ascii(LAT_REF, b"N\0"),
            GpsEntry::Rationals(LAT, vec![(40, 1), (30, 1), (0, 1)]),
            GpsEntry::Ascii(LON_REF, b"W\0"),
            GpsEntry::Rationals(LON, vec![(73, 1), (15, 1), (0, 1)]),
        ]);
        let coords = extract_gps(&data_url("image/tiff", &tiff)).unwrap();
        assert_close(coords.latitude, 40.5);
        assert_close(coords.longitude, -73.25);
    }

    #[test]
    fn test_missing_reference_counts_as_north_east() {
        let tiff = gps_tiff(&[
            GpsEntry::Rationals(LAT, vec![(10, 1), (0, 1), (0, 1)]),
            GpsEntry::Rationals(LON, vec![(20, 1), (0, 1), (0, 1)]),
        ]);
        let coords = read_gps(&tiff).unwrap();
        assert_eq!(coords, GpsCoordinates { latitude: 10.0, longitude: 20.0 });
    }

    #[test]
    fn test_image_without_exif_has_no_gps() {
        assert_eq!(extract_gps(&plain_jpeg_data_url()), Err(MetadataError::NoGpsData));
    }

    #[test]
    fn test_image_without_longitude_has_no_gps() {
        let tiff = gps_tiff(&[
            GpsEntry::Ascii(LAT_REF, b"N\0"),
            GpsEntry::Rationals(LAT, vec![(10, 1), (0, 1), (0, 1)]),
        ]);
        assert_eq!(read_gps(&tiff), Err(MetadataError::NoGpsData));
    }

    #[test]
    fn test_rejects_non_data_urls() {
        assert_eq!(decode_data_url("https://example.com/a.jpg"), Err(MetadataError::InvalidDataUrl));
        assert_eq!(decode_data_url("data:image/jpeg,plain"), Err(MetadataError::InvalidDataUrl));
        assert!(matches!(decode_data_url("data:image/jpeg;base64,@@@"), Err(MetadataError::Decode(_))));
    }

    #[test]
    fn test_garbage_bytes_are_exif_errors() {
        let err = read_gps(b"definitely not an image").unwrap_err();
        assert!(matches!(err, MetadataError::Exif(_)));
    }

    #[test]
    fn test_dms_conversion() {
        assert_eq!(dms_to_degrees(&[10.0]), Some(10.0));
        assert_eq!(dms_to_degrees(&[10.0, 30.0]), Some(10.5));
        assert_eq!(dms_to_degrees(&[]), None);
        assert_eq!(dms_to_degrees(&[f64::NAN, 0.0, 0.0]), None);
        assert_eq!(apply_reference(12.5, Some("s")), -12.5);
        assert_eq!(apply_reference(12.5, Some("N")), 12.5);
    }
}
