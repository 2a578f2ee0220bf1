//! Custom protocol handlers for efficient data transfer
//!
//! This module implements the `frame://` custom protocol for direct binary
//! transfer of globe frames and marker placements, bypassing Tauri's IPC JSON
//! serialization.

use image::{codecs::jpeg::JpegEncoder, ImageEncoder};
use tauri::http::Response as HttpResponse;
use tracing::debug;

use super::error::{lock, BridgeError};
use super::shared_state::{Frame, GlobeLink, GlobeStatus};
use crate::config::compression::JPEG_QUALITY;

type Response = HttpResponse<Vec<u8>>;

/// Handle requests to the custom `frame://` protocol
///
/// Supported endpoints:
/// - `frame` or `frame.jpg`: JPEG-compressed globe frame
/// - `frame.raw`: Raw RGBA frame
/// - `markers`: Latest marker placements as JSON
pub fn handle_frame_protocol(uri_path: &str, link: &GlobeLink) -> Response {
    let resource = uri_path.trim_start_matches('/');
    debug!("[Protocol] Resolved resource: {}", resource);

    if link.status.get() == GlobeStatus::Unavailable {
        return error_response(&BridgeError::GlobeUnavailable);
    }

    let result = match resource {
        // JPEG compressed frame - much smaller data size!
        "frame" | "frame.jpg" => jpeg_frame(link),

        // Raw RGBA frame (for comparison/debugging)
        "frame.raw" => raw_frame(link),

        "markers" => markers(link),

        _ => Ok(respond(404, "text/plain", b"Not Found".to_vec(), None)),
    };

    result.unwrap_or_else(|err| error_response(&err))
}

/// Compress an RGBA frame to JPEG (alpha dropped)
pub fn encode_jpeg(frame: &Frame) -> Result<Vec<u8>, BridgeError> {
    let malformed = || BridgeError::MalformedFrame {
        width: frame.width,
        height: frame.height,
    };
    if frame.rgba.len() != frame.width as usize * frame.height as usize * 4 {
        return Err(malformed());
    }

    let rgb: Vec<u8> = frame
        .rgba
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut jpeg_data = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_data, JPEG_QUALITY).write_image(
        &rgb,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(jpeg_data)
}

fn jpeg_frame(link: &GlobeLink) -> Result<Response, BridgeError> {
    let guard = lock(&link.frames.0, "frame buffer")?;
    let frame = guard.as_ref().ok_or(BridgeError::NotReady)?;
    let jpeg_data = encode_jpeg(frame)?;
    Ok(respond(200, "image/jpeg", jpeg_data, Some(frame)))
}

fn raw_frame(link: &GlobeLink) -> Result<Response, BridgeError> {
    let guard = lock(&link.frames.0, "frame buffer")?;
    let frame = guard.as_ref().ok_or(BridgeError::NotReady)?;
    Ok(respond(
        200,
        "application/octet-stream",
        frame.rgba.clone(),
        Some(frame),
    ))
}

fn markers(link: &GlobeLink) -> Result<Response, BridgeError> {
    let guard = lock(&link.markers.0, "marker board")?;
    let board = guard.as_ref().ok_or(BridgeError::NotReady)?;
    let json = serde_json::to_vec(board)?;
    Ok(respond(200, "application/json", json, None))
}

fn error_response(err: &BridgeError) -> Response {
    let status = match err {
        BridgeError::NotReady | BridgeError::GlobeUnavailable => 503,
        _ => 500,
    };
    respond(status, "text/plain", err.to_string().into_bytes(), None)
}

fn respond(status: u16, content_type: &str, body: Vec<u8>, frame: Option<&Frame>) -> Response {
    let mut builder = HttpResponse::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Access-Control-Allow-Origin", "*");
    if let Some(frame) = frame {
        builder = builder
            .header("X-Frame-Width", frame.width.to_string())
            .header("X-Frame-Height", frame.height.to_string())
            .header(
                "Access-Control-Expose-Headers",
                "X-Frame-Width, X-Frame-Height",
            );
    }
    builder.body(body).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_with_frame() -> GlobeLink {
        let link = GlobeLink::default();
        *link.frames.0.lock().unwrap() = Some(Frame {
            width: 4,
            height: 2,
            rgba: vec![200; 4 * 2 * 4],
        });
        link
    }

    #[test]
    fn jpeg_endpoint_returns_image() {
        let response = handle_frame_protocol("/frame.jpg", &link_with_frame());
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["X-Frame-Width"], "4");
        assert!(response.body().starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn missing_frame_is_service_unavailable() {
        let response = handle_frame_protocol("frame", &GlobeLink::default());
        assert_eq!(response.status(), 503);
    }

    #[test]
    fn unavailable_globe_short_circuits() {
        let link = link_with_frame();
        link.status.set(GlobeStatus::Unavailable);
        assert_eq!(handle_frame_protocol("frame.raw", &link).status(), 503);
    }

    #[test]
    fn unknown_resource_is_not_found() {
        assert_eq!(handle_frame_protocol("/nope", &link_with_frame()).status(), 404);
    }

    #[test]
    fn malformed_frame_is_rejected() {
        let frame = Frame {
            width: 10,
            height: 10,
            rgba: vec![0; 12],
        };
        assert!(matches!(
            encode_jpeg(&frame),
            Err(BridgeError::MalformedFrame { .. })
        ));
    }
}
