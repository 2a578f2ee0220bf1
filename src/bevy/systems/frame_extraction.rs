//! Frame extraction system
//!
//! This module handles taking rendered globe frames from the render world and
//! publishing them for the Tauri frontend.

use bevy::{prelude::*, render::renderer::RenderDevice, time::Time};
use tracing::debug;

use crate::bevy::plugins::image_copy::CapturedFrame;
use crate::bevy::resources::{
    FrameBufferRes, FrameCount, FrameRateLimiter, FrameTimings, MainWorldReceiver, PreRollFrames,
};
use crate::config::performance::*;
use crate::tauri_bridge::shared_state::Frame;

/// Publish the newest captured frame to the shared frame buffer
pub fn extract_and_process_frame(
    receiver: Res<MainWorldReceiver>,
    buffer: Option<Res<FrameBufferRes>>,
    mut count: ResMut<FrameCount>,
    mut pre_roll: ResMut<PreRollFrames>,
    mut timings: ResMut<FrameTimings>,
    mut frame_limiter: ResMut<FrameRateLimiter>,
    time: Res<Time>,
) {
    let Some(b) = buffer else { return };

    // Wait for scene to be fully rendered
    if pre_roll.0 > 0 {
        while receiver.try_recv().is_ok() {}
        pre_roll.0 -= 1;
        if pre_roll.0 % 10 == 0 && pre_roll.0 > 0 {
            debug!("[Bevy] Pre-roll frames remaining: {}", pre_roll.0);
        }
        return;
    }

    // Frame rate limiting - skip if not enough time has passed
    let now = std::time::Instant::now();
    if now.duration_since(frame_limiter.last_frame_time) < frame_limiter.min_frame_interval {
        while receiver.try_recv().is_ok() {}
        return;
    }
    frame_limiter.last_frame_time = now;

    let frame_start = std::time::Instant::now();

    // Only the newest frame matters
    let Some(captured) = receiver.try_iter().last() else {
        return;
    };
    let Some(frame) = remove_row_padding(captured) else {
        return;
    };
    let data_size = frame.rgba.len();

    let Ok(mut guard) = b.0 .0.lock() else {
        return;
    };
    *guard = Some(frame);
    drop(guard);
    count.0 += 1;

    let total_time = frame_start.elapsed().as_secs_f64() * 1000.0;
    timings.frame_times.push(total_time);
    if timings.frame_times.len() > FRAME_TIMING_SAMPLES {
        timings.frame_times.remove(0);
    }

    let current_time = time.elapsed_secs_f64();
    if current_time - timings.last_print_time >= STATS_PRINT_INTERVAL {
        let avg_time = timings.frame_times.iter().sum::<f64>() / timings.frame_times.len() as f64;
        let max_time = timings.frame_times.iter().cloned().fold(0.0f64, f64::max);
        debug!(
            "[Bevy] Frame {} | Publish: {:.2}ms | Avg: {:.2}ms | Max: {:.2}ms | Size: {:.1}KB",
            count.0,
            total_time,
            avg_time,
            max_time,
            data_size as f64 / 1024.0
        );
        timings.last_print_time = current_time;
    }
}

/// Strip GPU row alignment, returning tightly packed RGBA
///
/// Returns `None` when the capture is shorter than its declared size.
fn remove_row_padding(captured: CapturedFrame) -> Option<Frame> {
    let CapturedFrame {
        width,
        height,
        data,
    } = captured;

    let row_bytes = width as usize * 4;
    let aligned_row_bytes = RenderDevice::align_copy_bytes_per_row(row_bytes);
    if row_bytes == 0 || data.len() < aligned_row_bytes * (height as usize).saturating_sub(1) + row_bytes {
        return None;
    }

    let rgba = if row_bytes == aligned_row_bytes {
        let mut data = data;
        data.truncate(row_bytes * height as usize);
        data
    } else {
        data.chunks(aligned_row_bytes)
            .take(height as usize)
            .flat_map(|row| &row[..row_bytes])
            .copied()
            .collect()
    };

    Some(Frame {
        width,
        height,
        rgba,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_rows_are_stripped() {
        // 10px wide rows are 40 bytes, aligned to 256.
        let (width, height) = (10u32, 3u32);
        let aligned = RenderDevice::align_copy_bytes_per_row(40);
        let mut data = vec![0u8; aligned * height as usize];
        for row in 0..height as usize {
            data[row * aligned..row * aligned + 40].fill(row as u8 + 1);
        }

        let frame = remove_row_padding(CapturedFrame {
            width,
            height,
            data,
        })
        .unwrap();
        assert_eq!(frame.rgba.len(), 120);
        assert!(frame.rgba[..40].iter().all(|b| *b == 1));
        assert!(frame.rgba[80..].iter().all(|b| *b == 3));
    }

    #[test]
    fn short_capture_is_rejected() {
        let captured = CapturedFrame {
            width: 64,
            height: 4,
            data: vec![0; 100],
        };
        assert!(remove_row_padding(captured).is_none());
    }
}
