//! 4x4 matrix and 3-vector kernel.
//!
//! Matrices hold 16 values in row-major order with the translation in row 3.
//! Points are row vectors multiplied on the left (`v × M`), so a chain
//! `a × b` applies `a` first and `b` second. Under this layout the same 16
//! values read as a column-major, column-vector matrix, which is the layout
//! GPU uniform uploads expect.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Lengths at or below this are treated as zero by [`normalize`].
pub const NORMALIZE_EPSILON: f64 = 0.00001;

/// Row-major 4x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4(pub [f64; 16]);

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Element at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0[row * 4 + col]
    }

    /// Raw values in storage order.
    pub fn as_array(&self) -> &[f64; 16] {
        &self.0
    }

    /// Values narrowed to f32 for uniform uploads.
    pub fn to_f32_array(&self) -> [f32; 16] {
        self.0.map(|v| v as f32)
    }

    /// The equivalent column-vector matrix in glam's convention.
    ///
    /// No transpose happens: our rows are glam's columns.
    pub fn to_glam(&self) -> glam::DMat4 {
        glam::DMat4::from_cols_array(&self.0)
    }

    pub fn from_glam(m: &glam::DMat4) -> Self {
        Mat4(m.to_cols_array())
    }

    /// Multiply the row vector `(p, 1)` by this matrix.
    pub fn transform_point(&self, p: [f64; 3]) -> [f64; 4] {
        let v = [p[0], p[1], p[2], 1.0];
        let mut out = [0.0; 4];
        for (col, slot) in out.iter_mut().enumerate() {
            *slot = (0..4).map(|row| v[row] * self.get(row, col)).sum();
        }
        out
    }

    /// True if any element is NaN or infinite (e.g. the inverse of a singular matrix).
    pub fn is_degenerate(&self) -> bool {
        self.0.iter().any(|v| !v.is_finite())
    }
}

/// Identity with row 3 set to `(tx, ty, tz, 1)`.
pub fn make_translation(tx: f64, ty: f64, tz: f64) -> Mat4 {
    Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        tx, ty, tz, 1.0,
    ])
}

/// Rotation in the X-Y plane; Z and W untouched.
pub fn make_z_rotation(theta: f64) -> Mat4 {
    let (s, c) = theta.sin_cos();
    Mat4([
        c, s, 0.0, 0.0, //
        -s, c, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// `a × b`: apply `a`, then `b`.
pub fn matrix_multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [0.0; 16];
    for row in 0..4 {
        for col in 0..4 {
            out[row * 4 + col] = a.get(row, 0) * b.get(0, col)
                + a.get(row, 1) * b.get(1, col)
                + a.get(row, 2) * b.get(2, col)
                + a.get(row, 3) * b.get(3, col);
        }
    }
    Mat4(out)
}

/// General inverse by cofactor expansion.
///
/// There is no singularity check: a zero determinant yields NaN/Inf entries.
pub fn make_inverse(m: &Mat4) -> Mat4 {
    let [m00, m01, m02, m03, m10, m11, m12, m13, m20, m21, m22, m23, m30, m31, m32, m33] = m.0;

    let tmp0 = m22 * m33;
    let tmp1 = m32 * m23;
    let tmp2 = m12 * m33;
    let tmp3 = m32 * m13;
    let tmp4 = m12 * m23;
    let tmp5 = m22 * m13;
    let tmp6 = m02 * m33;
    let tmp7 = m32 * m03;
    let tmp8 = m02 * m23;
    let tmp9 = m22 * m03;
    let tmp10 = m02 * m13;
    let tmp11 = m12 * m03;
    let tmp12 = m20 * m31;
    let tmp13 = m30 * m21;
    let tmp14 = m10 * m31;
    let tmp15 = m30 * m11;
    let tmp16 = m10 * m21;
    let tmp17 = m20 * m11;
    let tmp18 = m00 * m31;
    let tmp19 = m30 * m01;
    let tmp20 = m00 * m21;
    let tmp21 = m20 * m01;
    let tmp22 = m00 * m11;
    let tmp23 = m10 * m01;

    let t0 = (tmp0 * m11 + tmp3 * m21 + tmp4 * m31) - (tmp1 * m11 + tmp2 * m21 + tmp5 * m31);
    let t1 = (tmp1 * m01 + tmp6 * m21 + tmp9 * m31) - (tmp0 * m01 + tmp7 * m21 + tmp8 * m31);
    let t2 = (tmp2 * m01 + tmp7 * m11 + tmp10 * m31) - (tmp3 * m01 + tmp6 * m11 + tmp11 * m31);
    let t3 = (tmp5 * m01 + tmp8 * m11 + tmp11 * m21) - (tmp4 * m01 + tmp9 * m11 + tmp10 * m21);

    let d = 1.0 / (m00 * t0 + m10 * t1 + m20 * t2 + m30 * t3);

    Mat4([
        d * t0,
        d * t1,
        d * t2,
        d * t3,
        d * ((tmp1 * m10 + tmp2 * m20 + tmp5 * m30) - (tmp0 * m10 + tmp3 * m20 + tmp4 * m30)),
        d * ((tmp0 * m00 + tmp7 * m20 + tmp8 * m30) - (tmp1 * m00 + tmp6 * m20 + tmp9 * m30)),
        d * ((tmp3 * m00 + tmp6 * m10 + tmp11 * m30) - (tmp2 * m00 + tmp7 * m10 + tmp10 * m30)),
        d * ((tmp4 * m00 + tmp9 * m10 + tmp10 * m20) - (tmp5 * m00 + tmp8 * m10 + tmp11 * m20)),
        d * ((tmp12 * m13 + tmp15 * m23 + tmp16 * m33) - (tmp13 * m13 + tmp14 * m23 + tmp17 * m33)),
        d * ((tmp13 * m03 + tmp18 * m23 + tmp21 * m33) - (tmp12 * m03 + tmp19 * m23 + tmp20 * m33)),
        d * ((tmp14 * m03 + tmp19 * m13 + tmp22 * m33) - (tmp15 * m03 + tmp18 * m13 + tmp23 * m33)),
        d * ((tmp17 * m03 + tmp20 * m13 + tmp23 * m23) - (tmp16 * m03 + tmp21 * m13 + tmp22 * m23)),
        d * ((tmp14 * m22 + tmp17 * m32 + tmp13 * m12) - (tmp16 * m32 + tmp12 * m12 + tmp15 * m22)),
        d * ((tmp20 * m32 + tmp12 * m02 + tmp19 * m22) - (tmp18 * m22 + tmp21 * m32 + tmp13 * m02)),
        d * ((tmp18 * m12 + tmp23 * m32 + tmp15 * m02) - (tmp22 * m32 + tmp14 * m02 + tmp19 * m12)),
        d * ((tmp22 * m22 + tmp16 * m02 + tmp21 * m12) - (tmp20 * m12 + tmp23 * m22 + tmp17 * m02)),
    ])
}

/// Perspective projection looking down -z. Depth lands in [-1, 1] after the
/// divide, near plane at -1.
pub fn make_perspective(fov_radians: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
    // cot(fov / 2)
    let f = (PI * 0.5 - 0.5 * fov_radians).tan();
    let range_inv = 1.0 / (near - far);

    Mat4([
        f / aspect, 0.0, 0.0, 0.0, //
        0.0, f, 0.0, 0.0, //
        0.0, 0.0, (near + far) * range_inv, -1.0, //
        0.0, 0.0, near * far * range_inv * 2.0, 0.0,
    ])
}

/// Unit vector, or `(0, 0, 0)` for lengths at or below [`NORMALIZE_EPSILON`].
pub fn normalize(v: [f64; 3]) -> [f64; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > NORMALIZE_EPSILON {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        [0.0, 0.0, 0.0]
    }
}
