// Checkin strip decoder
//
// The dashboard encodes a node's 24-hour role history as a one-pixel-tall
// strip of colored columns instead of exposing a timeseries. This module
// turns those image bytes back into percentages by exact color matching.
//
// The color values and the 2-column border are a versioned contract with
// the upstream dashboard. Changing either silently corrupts every derived
// uptime figure, so they live here as named constants and nowhere else.

use tracing::trace;

use crate::error::Error;

/// Pixel color marking an hour column spent as an active gateway (#1faa5f).
const GATEWAY_ACTIVE: [u8; 3] = [0x1f, 0xaa, 0x5f];
/// Pixel color marking an hour column spent as an active relay (#4fdd8f).
const RELAY_ACTIVE: [u8; 3] = [0x4f, 0xdd, 0x8f];
/// Pixel color marking an offline column (#cccccc).
const OFFLINE: [u8; 3] = [0xcc, 0xcc, 0xcc];

/// The strip reserves one border/margin column on each side; those two
/// columns carry no data but stay in the percentage denominator.
const BORDER_COLUMNS: u32 = 2;

/// Row 0 is border; the data row is the second pixel row.
const DATA_ROW: u32 = 1;

/// A node's 24-hour role history, decoded from its checkin strip.
///
/// The three percentages sum to at most 100; unrecognized pixel colors
/// count toward the denominator but no bucket, so the sum drops below 100
/// when the upstream palette drifts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CheckinBreakdown {
    pub pct_time_as_gateway: f64,
    pub pct_time_as_relay: f64,
    pub pct_time_offline: f64,
}

/// Decode a checkin strip image into role/offline percentages.
///
/// Pure function of the image bytes: decodes the bitmap, classifies every
/// column of the data row against the three known colors, and divides by
/// the data-bearing width (`width - 2`). Undecodable bytes or an image too
/// narrow to carry data fail with [`Error::InvalidCheckinImage`].
pub fn decode_checkin_strip(bytes: &[u8]) -> Result<CheckinBreakdown, Error> {
    let img = image::load_from_memory(bytes).map_err(|e| Error::InvalidCheckinImage {
        reason: e.to_string(),
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    if width <= BORDER_COLUMNS {
        return Err(Error::InvalidCheckinImage {
            reason: format!("strip is {width} columns wide, no room for data"),
        });
    }
    if height <= DATA_ROW {
        return Err(Error::InvalidCheckinImage {
            reason: format!("strip is {height} rows tall, data row missing"),
        });
    }

    let mut gateway = 0u32;
    let mut relay = 0u32;
    let mut offline = 0u32;

    for col in 0..width {
        let pixel = rgb.get_pixel(col, DATA_ROW);
        match pixel.0 {
            GATEWAY_ACTIVE => gateway += 1,
            RELAY_ACTIVE => relay += 1,
            OFFLINE => offline += 1,
            // Border and legend colors fall through uncounted; they still
            // weigh down the denominator.
            _ => {}
        }
    }

    trace!(width, gateway, relay, offline, "classified checkin strip");

    let denominator = f64::from(width - BORDER_COLUMNS);

    Ok(CheckinBreakdown {
        pct_time_as_gateway: f64::from(gateway) / denominator * 100.0,
        pct_time_as_relay: f64::from(relay) / denominator * 100.0,
        pct_time_offline: f64::from(offline) / denominator * 100.0,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb, RgbImage};
    use pretty_assertions::assert_eq;

    use super::*;

    const BORDER: [u8; 3] = [0x00, 0x00, 0x00];

    /// Build a PNG strip: 1 border column, `data` columns, 1 border column,
    /// with a border row above the data row.
    fn strip(data: &[[u8; 3]]) -> Vec<u8> {
        let width = u32::try_from(data.len()).unwrap() + 2;
        let mut img = RgbImage::from_pixel(width, 2, Rgb(BORDER));

        for (i, color) in data.iter().enumerate() {
            img.put_pixel(u32::try_from(i).unwrap() + 1, 1, Rgb(*color));
        }

        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn all_gateway_columns_decode_to_full_uptime() {
        let data = vec![GATEWAY_ACTIVE; 10];
        let breakdown = decode_checkin_strip(&strip(&data)).unwrap();

        assert_eq!(breakdown.pct_time_as_gateway, 100.0);
        assert_eq!(breakdown.pct_time_as_relay, 0.0);
        assert_eq!(breakdown.pct_time_offline, 0.0);
    }

    #[test]
    fn mixed_columns_split_the_percentages() {
        // Width 12 total: 10 data columns, 5 offline + 5 gateway.
        let mut data = vec![OFFLINE; 5];
        data.extend(vec![GATEWAY_ACTIVE; 5]);

        let breakdown = decode_checkin_strip(&strip(&data)).unwrap();

        assert_eq!(breakdown.pct_time_offline, 50.0);
        assert_eq!(breakdown.pct_time_as_gateway, 50.0);
        assert_eq!(breakdown.pct_time_as_relay, 0.0);
    }

    #[test]
    fn unrecognized_colors_shrink_the_total_below_100() {
        let mut data = vec![RELAY_ACTIVE; 5];
        data.extend(vec![[0x12, 0x34, 0x56]; 5]);

        let breakdown = decode_checkin_strip(&strip(&data)).unwrap();

        assert_eq!(breakdown.pct_time_as_relay, 50.0);
        assert_eq!(breakdown.pct_time_as_gateway, 0.0);
        assert_eq!(breakdown.pct_time_offline, 0.0);
    }

    #[test]
    fn strip_too_narrow_for_data_is_rejected() {
        let mut img = RgbImage::from_pixel(2, 2, Rgb(BORDER));
        img.put_pixel(0, 1, Rgb(GATEWAY_ACTIVE));

        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let err = decode_checkin_strip(&bytes).unwrap_err();
        assert!(matches!(err, Error::InvalidCheckinImage { .. }));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = decode_checkin_strip(b"not an image at all").unwrap_err();
        assert!(matches!(err, Error::InvalidCheckinImage { .. }));
    }
}
