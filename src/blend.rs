//! Generic same-format blend/overlay/fill primitives used by the
//! compositor adapter. These replace the 21 hand-written per-format
//! functions in `gst_video_mixer_blend.c` with two families driven by
//! `gst_video::VideoFormatInfo` component layout: one for planar/semi-
//! planar YUV, one for packed RGB/YUV. Both assume `src` and `dest` share
//! the same `VideoFormat`, which the negotiator guarantees by converting
//! every input to the elected output format before compositing.

use gst_video::prelude::*;

fn scaled(value: i32, shift: u32) -> i32 {
    if shift == 0 {
        value
    } else {
        (value + (1 << shift) - 1) >> shift
    }
}

fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Blend `src` onto `dest` at (`xpos`, `ypos`) with per-pixel alpha
/// `alpha`, for planar/semi-planar layouts (I420, YV12, Y444, Y42B,
/// Y41B, NV12, NV21).
pub fn planar_blend(
    src: &gst_video::VideoFrameRef<&gst::BufferRef>,
    xpos: i32,
    ypos: i32,
    alpha: f64,
    dest: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>,
) {
    blend_or_overlay(src, xpos, ypos, alpha, dest)
}

pub fn planar_overlay(
    src: &gst_video::VideoFrameRef<&gst::BufferRef>,
    xpos: i32,
    ypos: i32,
    alpha: f64,
    dest: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>,
) {
    blend_or_overlay(src, xpos, ypos, alpha, dest)
}

/// Alpha-weighted composition shared by blend and overlay: every plane's
/// sample is `src*alpha + dest*(1-alpha)`, including any alpha plane a
/// format carries, so `alpha=0` leaves `dest` untouched and `alpha=1`
/// fully replaces it regardless of which primitive the caller picked.
fn blend_or_overlay(
    src: &gst_video::VideoFrameRef<&gst::BufferRef>,
    xpos: i32,
    ypos: i32,
    alpha: f64,
    dest: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>,
) {
    let info = src.format_info();
    let n_components = info.n_components();

    let src_w = src.width() as i32;
    let src_h = src.height() as i32;
    let dest_w = dest.width() as i32;
    let dest_h = dest.height() as i32;

    for c in 0..n_components {
        let plane = info.plane(c) as usize;
        let w_sub = info.w_sub(c) as u32;
        let h_sub = info.h_sub(c) as u32;

        let src_stride = src.plane_stride()[plane] as usize;
        let dest_stride = dest.plane_stride()[plane] as usize;

        let comp_src_w = scaled(src_w, w_sub);
        let comp_src_h = scaled(src_h, h_sub);
        let comp_dest_w = scaled(dest_w, w_sub);
        let comp_dest_h = scaled(dest_h, h_sub);
        let comp_xpos = scaled(xpos, w_sub);
        let comp_ypos = scaled(ypos, h_sub);

        let src_plane = src.plane_data(plane as u32).unwrap().to_vec();
        let dest_plane = dest.plane_data_mut(plane as u32).unwrap();

        for y in 0..comp_src_h {
            let dy = comp_ypos + y;
            if dy < 0 || dy >= comp_dest_h {
                continue;
            }
            for x in 0..comp_src_w {
                let dx = comp_xpos + x;
                if dx < 0 || dx >= comp_dest_w {
                    continue;
                }

                let src_off = y as usize * src_stride + x as usize;
                let dest_off = dy as usize * dest_stride + dx as usize;
                if src_off >= src_plane.len() || dest_off >= dest_plane.len() {
                    continue;
                }

                let sval = src_plane[src_off] as i32;
                let dval = dest_plane[dest_off] as i32;
                let blended = (sval as f64 * alpha + dval as f64 * (1.0 - alpha)) as i32;
                dest_plane[dest_off] = clamp_u8(blended);
            }
        }
    }
}

pub fn planar_fill_checker(dest: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>) {
    let info = dest.format_info();
    let n_components = info.n_components();
    let w = dest.width() as i32;
    let h = dest.height() as i32;

    for c in 0..n_components {
        let plane = info.plane(c) as usize;
        let w_sub = info.w_sub(c) as u32;
        let h_sub = info.h_sub(c) as u32;
        let stride = dest.plane_stride()[plane] as usize;
        let comp_w = scaled(w, w_sub);
        let comp_h = scaled(h, h_sub);
        let is_luma_or_rgb = c == 0;
        let data = dest.plane_data_mut(plane as u32).unwrap();

        for y in 0..comp_h {
            for x in 0..comp_w {
                let off = y as usize * stride + x as usize;
                if off >= data.len() {
                    continue;
                }
                if is_luma_or_rgb {
                    // checker squares are 8 full-resolution pixels wide, so
                    // shift the period by this component's subsampling.
                    let check = ((x >> (3u32.saturating_sub(w_sub)))
                        + (y >> (3u32.saturating_sub(h_sub))))
                        % 2
                        == 0;
                    data[off] = if check { 80 } else { 160 };
                } else {
                    data[off] = 128;
                }
            }
        }
    }
}

pub fn planar_fill_color(dest: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>, y: u8, u: u8, v: u8) {
    let info = dest.format_info();
    let n_components = info.n_components();
    let w = dest.width() as i32;
    let h = dest.height() as i32;

    for c in 0..n_components {
        let plane = info.plane(c) as usize;
        let w_sub = info.w_sub(c) as u32;
        let h_sub = info.h_sub(c) as u32;
        let stride = dest.plane_stride()[plane] as usize;
        let comp_w = scaled(w, w_sub);
        let comp_h = scaled(h, h_sub);
        let fill = match c {
            0 => y,
            1 => u,
            _ => v,
        };
        let data = dest.plane_data_mut(plane as u32).unwrap();
        for row in 0..comp_h {
            let start = row as usize * stride;
            let end = (start + comp_w as usize).min(data.len());
            if start < end {
                data[start..end].fill(fill);
            }
        }
    }
}

/// Packed RGB/YUV family (AYUV, ARGB, BGRA, RGBA, ABGR, xRGB, xBGR, RGBx,
/// BGRx, RGB, BGR, YUY2, UYVY, YVYU). All are single-plane with a fixed
/// per-component byte offset and stride, so the same loop handles every
/// one of them by reading the format's `poffset`/`pstride` table.
pub fn packed_blend(
    src: &gst_video::VideoFrameRef<&gst::BufferRef>,
    xpos: i32,
    ypos: i32,
    alpha: f64,
    dest: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>,
) {
    packed_blend_or_overlay(src, xpos, ypos, alpha, dest)
}

pub fn packed_overlay(
    src: &gst_video::VideoFrameRef<&gst::BufferRef>,
    xpos: i32,
    ypos: i32,
    alpha: f64,
    dest: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>,
) {
    packed_blend_or_overlay(src, xpos, ypos, alpha, dest)
}

fn packed_blend_or_overlay(
    src: &gst_video::VideoFrameRef<&gst::BufferRef>,
    xpos: i32,
    ypos: i32,
    alpha: f64,
    dest: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>,
) {
    let info = src.format_info();
    let n_components = info.n_components();
    let src_w = src.width() as i32;
    let src_h = src.height() as i32;
    let dest_w = dest.width() as i32;
    let dest_h = dest.height() as i32;

    let src_stride = src.plane_stride()[0] as usize;
    let dest_stride = dest.plane_stride()[0] as usize;
    let src_plane = src.plane_data(0).unwrap().to_vec();
    let dest_plane = dest.plane_data_mut(0).unwrap();

    for y in 0..src_h {
        let dy = ypos + y;
        if dy < 0 || dy >= dest_h {
            continue;
        }
        for x in 0..src_w {
            let dx = xpos + x;
            if dx < 0 || dx >= dest_w {
                continue;
            }

            for c in 0..n_components {
                let poffset = info.poffset(c) as usize;
                let src_pstride = info.pstride(c) as usize;
                let dest_pstride = src_pstride;

                let src_off = y as usize * src_stride + x as usize * src_pstride + poffset;
                let dest_off = dy as usize * dest_stride + dx as usize * dest_pstride + poffset;
                if src_off >= src_plane.len() || dest_off >= dest_plane.len() {
                    continue;
                }

                let sval = src_plane[src_off] as i32;
                let dval = dest_plane[dest_off] as i32;
                let blended = (sval as f64 * alpha + dval as f64 * (1.0 - alpha)) as i32;
                dest_plane[dest_off] = clamp_u8(blended);
            }
        }
    }
}

pub fn packed_fill_checker(dest: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>) {
    let info = dest.format_info();
    let n_components = info.n_components();
    let w = dest.width() as i32;
    let h = dest.height() as i32;
    let stride = dest.plane_stride()[0] as usize;
    let data = dest.plane_data_mut(0).unwrap();

    for y in 0..h {
        for x in 0..w {
            let check = ((x >> 3) + (y >> 3)) % 2 == 0;
            for c in 0..n_components {
                let poffset = info.poffset(c) as usize;
                let pstride = info.pstride(c) as usize;
                let off = y as usize * stride + x as usize * pstride + poffset;
                if off >= data.len() {
                    continue;
                }
                data[off] = if check { 80 } else { 160 };
            }
        }
    }
}

pub fn packed_fill_color(dest: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>, y: u8, u: u8, v: u8) {
    let info = dest.format_info();
    let n_components = info.n_components();
    let is_rgb = info.is_rgb();
    let w = dest.width() as i32;
    let h = dest.height() as i32;
    let stride = dest.plane_stride()[0] as usize;
    let data = dest.plane_data_mut(0).unwrap();

    for row in 0..h {
        for x in 0..w {
            for c in 0..n_components {
                let poffset = info.poffset(c) as usize;
                let pstride = info.pstride(c) as usize;
                let off = row as usize * stride + x as usize * pstride + poffset;
                if off >= data.len() {
                    continue;
                }
                data[off] = if is_rgb {
                    y
                } else {
                    match c {
                        0 => y,
                        1 => u,
                        _ => v,
                    }
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_halves_on_shift_one() {
        assert_eq!(scaled(64, 1), 32);
        assert_eq!(scaled(65, 1), 33);
    }

    #[test]
    fn scaled_identity_on_shift_zero() {
        assert_eq!(scaled(640, 0), 640);
    }

    #[test]
    fn clamp_saturates() {
        assert_eq!(clamp_u8(300), 255);
        assert_eq!(clamp_u8(-10), 0);
        assert_eq!(clamp_u8(128), 128);
    }
}
