//! Static teapot mesh used by the optional demo model.

/// Number of vertices in [`TEAPOT_VERTS`].
pub const TEAPOT_VERT_COUNT: usize = 138;

/// Flat x, y, z positions.
#[rustfmt::skip]
pub static TEAPOT_VERTS: [f32; TEAPOT_VERT_COUNT * 3] = [
    0.7, 1.2, -0.0,
    0.7, 1.25, -0.0,
    0.75, 1.2, -0.0,
    0.5, 1.2, 0.5,
    0.5, 1.25, 0.5,
    0.53, 1.2, 0.53,
    0.0, 1.2, 0.7,
    0.0, 1.25, 0.7,
    0.0, 1.2, 0.75,
    -0.51, 1.2, 0.5,
    -0.5, 1.25, 0.5,
    -0.53, 1.2, 0.53,
    -0.7, 1.2, -0.0,
    -0.7, 1.25, -0.0,
    -0.75, 1.2, -0.0,
    -0.5, 1.2, -0.5,
    -0.5, 1.25, -0.5,
    -0.53, 1.2, -0.53,
    0.0, 1.2, -0.7,
    0.0, 1.25, -0.7,
    0.0, 1.2, -0.75,
    0.5, 1.2, -0.5,
    0.5, 1.25, -0.5,
    0.53, 1.2, -0.53,
    0.92, 0.81, -0.0,
    1.0, 0.45, -0.0,
    0.65, 0.81, 0.65,
    0.71, 0.45, 0.71,
    0.0, 0.81, 0.92,
    0.0, 0.45, 1.0,
    -0.65, 0.81, 0.65,
    -0.71, 0.45, 0.71,
    -0.92, 0.81, -0.0,
    -1.0, 0.45, -0.0,
    -0.65, 0.81, -0.65,
    -0.71, 0.45, -0.71,
    0.0, 0.81, -0.92,
    0.0, 0.45, -1.0,
    0.65, 0.81, -0.65,
    0.71, 0.45, -0.71,
    0.88, 0.19, -0.0,
    0.75, 0.08, -0.0,
    0.62, 0.19, 0.62,
    0.53, 0.08, 0.53,
    0.0, 0.19, 0.88,
    0.0, 0.08, 0.75,
    -0.62, 0.19, 0.62,
    -0.53, 0.08, 0.53,
    -0.88, 0.19, -0.0,
    -0.75, 0.08, -0.0,
    -0.62, 0.19, -0.62,
    -0.53, 0.08, -0.53,
    0.0, 0.19, -0.88,
    0.0, 0.08, -0.75,
    0.62, 0.19, -0.62,
    0.53, 0.08, -0.53,
    0.64, 0.02, -0.0,
    0.0, 0.0, -0.0,
    0.46, 0.02, 0.46,
    0.0, 0.02, 0.64,
    -0.46, 0.02, 0.46,
    -0.64, 0.02, -0.0,
    -0.46, 0.02, -0.46,
    0.0, 0.02, -0.64,
    0.46, 0.02, -0.46,
    -0.8, 1.01, -0.0,
    -1.21, 1.0, -0.0,
    -1.35, 0.9, -0.0,
    -0.77, 1.07, 0.11,
    -1.26, 1.05, 0.11,
    -1.42, 0.9, 0.11,
    -0.75, 1.13, -0.0,
    -1.31, 1.1, -0.0,
    -1.5, 0.9, -0.0,
    -0.78, 1.07, -0.11,
    -1.26, 1.05, -0.11,
    -1.43, 0.9, -0.11,
    -1.27, 0.68, -0.0,
    -1.0, 0.45, -0.0,
    -1.32, 0.63, 0.11,
    -0.97, 0.38, 0.11,
    -1.37, 0.58, -0.0,
    -0.95, 0.3, -0.0,
    -1.32, 0.63, -0.11,
    -0.98, 0.38, -0.11,
    0.85, 0.71, -0.0,
    1.19, 0.9, -0.0,
    1.35, 1.2, -0.0,
    0.85, 0.51, 0.25,
    1.27, 0.81, 0.17,
    1.5, 1.2, 0.09,
    0.85, 0.3, -0.0,
    1.34, 0.72, -0.0,
    1.65, 1.2, -0.0,
    0.85, 0.51, -0.25,
    1.27, 0.81, -0.17,
    1.5, 1.2, -0.09,
    1.41, 1.23, -0.0,
    1.4, 1.2, -0.0,
    1.56, 1.23, 0.07,
    1.5, 1.2, 0.06,
    1.71, 1.24, -0.0,
    1.6, 1.2, -0.0,
    1.56, 1.23, -0.07,
    1.5, 1.2, -0.06,
    0.0, 1.58, -0.0,
    0.16, 1.49, -0.0,
    0.1, 1.35, -0.0,
    0.12, 1.49, 0.12,
    0.07, 1.35, 0.07,
    0.0, 1.49, 0.16,
    0.0, 1.35, 0.1,
    -0.12, 1.49, 0.12,
    -0.07, 1.35, 0.07,
    -0.16, 1.49, -0.0,
    -0.1, 1.35, -0.0,
    -0.12, 1.49, -0.12,
    -0.07, 1.35, -0.07,
    0.0, 1.49, -0.16,
    0.0, 1.35, -0.1,
    0.12, 1.49, -0.12,
    0.07, 1.35, -0.07,
    0.41, 1.27, -0.0,
    0.65, 1.2, -0.0,
    0.29, 1.27, 0.29,
    0.46, 1.2, 0.46,
    0.0, 1.27, 0.41,
    0.0, 1.2, 0.65,
    -0.29, 1.27, 0.29,
    -0.46, 1.2, 0.46,
    -0.41, 1.27, -0.0,
    -0.65, 1.2, -0.0,
    -0.29, 1.27, -0.29,
    -0.46, 1.2, -0.46,
    0.0, 1.27, -0.41,
    0.0, 1.2, -0.65,
    0.29, 1.27, -0.29,
    0.46, 1.2, -0.46,
];

/// Triangle list into [`TEAPOT_VERTS`], 253 triangles.
#[rustfmt::skip]
pub static TEAPOT_INDICES: [u16; 759] = [
    0, 3, 4, 4, 1, 0, 1, 4, 5, 5, 2, 1,
    3, 6, 7, 7, 4, 3, 4, 7, 8, 8, 5, 4,
    6, 9, 10, 10, 7, 6, 7, 10, 11, 11, 8, 7,
    9, 12, 13, 13, 10, 9, 10, 13, 14, 14, 11, 10,
    12, 15, 16, 16, 13, 12, 13, 16, 17, 17, 14, 13,
    15, 18, 19, 19, 16, 15, 16, 19, 20, 20, 17, 16,
    18, 21, 22, 22, 19, 18, 19, 22, 23, 23, 20, 19,
    21, 0, 1, 1, 22, 21, 22, 1, 2, 2, 23, 22,
    2, 5, 26, 26, 24, 2, 24, 26, 27, 27, 25, 24,
    5, 8, 28, 28, 26, 5, 26, 28, 29, 29, 27, 26,
    8, 11, 30, 30, 28, 8, 28, 30, 31, 31, 29, 28,
    11, 14, 32, 32, 30, 11, 30, 32, 33, 33, 31, 30,
    14, 17, 34, 34, 32, 14, 32, 34, 35, 35, 33, 32,
    17, 20, 36, 36, 34, 17, 34, 36, 37, 37, 35, 34,
    20, 23, 38, 38, 36, 20, 36, 38, 39, 39, 37, 36,
    23, 2, 24, 24, 38, 23, 38, 24, 25, 25, 39, 38,
    25, 27, 42, 42, 40, 25, 40, 42, 43, 43, 41, 40,
    27, 29, 44, 44, 42, 27, 42, 44, 45, 45, 43, 42,
    29, 31, 46, 46, 44, 29, 44, 46, 47, 47, 45, 44,
    31, 33, 48, 48, 46, 31, 46, 48, 49, 49, 47, 46,
    33, 35, 50, 50, 48, 33, 48, 50, 51, 51, 49, 48,
    35, 37, 52, 52, 50, 35, 50, 52, 53, 53, 51, 50,
    37, 39, 54, 54, 52, 37, 52, 54, 55, 55, 53, 52,
    39, 25, 40, 40, 54, 39, 54, 40, 41, 41, 55, 54,
    41, 43, 58, 58, 56, 41, 56, 58, 57, 57, 57, 56,
    43, 45, 59, 59, 58, 43, 58, 59, 57, 57, 57, 58,
    45, 47, 60, 60, 59, 45, 59, 60, 57, 57, 57, 59,
    47, 49, 61, 61, 60, 47, 60, 61, 57, 57, 57, 60,
    49, 51, 62, 62, 61, 49, 61, 62, 57, 57, 57, 61,
    51, 53, 63, 63, 62, 51, 62, 63, 57, 57, 57, 62,
    53, 55, 64, 64, 63, 53, 63, 64, 57, 57, 57, 63,
    55, 41, 56, 56, 64, 55, 64, 56, 57, 57, 57, 64,
    65, 68, 69, 69, 66, 65, 66, 69, 70, 70, 67, 66,
    68, 71, 72, 72, 69, 68, 69, 72, 73, 73, 70, 69,
    71, 74, 75, 75, 72, 71, 72, 75, 76, 76, 73, 72,
    74, 65, 66, 66, 75, 74, 75, 66, 67, 67, 76, 75,
    67, 70, 79, 79, 77, 67, 77, 79, 80, 80, 78, 77,
    70, 73, 81, 81, 79, 70, 79, 81, 82, 82, 80, 79,
    73, 76, 83, 83, 81, 73, 81, 83, 84, 84, 82, 81,
    76, 67, 77, 77, 83, 76, 83, 77, 78, 78, 84, 83,
    85, 88, 89, 89, 86, 85, 86, 89, 90, 90, 87, 86,
    88, 91, 92, 92, 89, 88, 89, 92, 93, 93, 90, 89,
    91, 94, 95, 95, 92, 91, 92, 95, 96, 96, 93, 92,
    94, 85, 86, 86, 95, 94, 95, 86, 87, 87, 96, 95,
    87, 90, 99, 99, 97, 87, 97, 99, 100, 100, 98, 97,
    90, 93, 101, 101, 99, 90, 99, 101, 102, 102, 100, 99,
    93, 96, 103, 103, 101, 93, 101, 103, 104, 104, 102, 101,
    96, 87, 97, 97, 103, 96, 103, 97, 98, 98, 104, 103,
    105, 105, 108, 108, 106, 105, 106, 108, 109, 109, 107, 106,
    105, 105, 110, 110, 108, 105, 108, 110, 111, 111, 109, 108,
    105, 105, 112, 112, 110, 105, 110, 112, 113, 113, 111, 110,
    105, 105, 114, 114, 112, 105, 112, 114, 115, 115, 113, 112,
    105, 105, 116, 116, 114, 105, 114, 116, 117, 117, 115, 114,
    105, 105, 118, 118, 116, 105, 116, 118, 119, 119, 117, 116,
    105, 105, 120, 120, 118, 105, 118, 120, 121, 121, 119, 118,
    105, 105, 106, 106, 120, 105, 120, 106, 107, 107, 121, 120,
    107, 109, 124, 124, 122, 107, 122, 124, 125, 125, 123, 122,
    109, 111, 126, 126, 124, 109, 124, 126, 127, 127, 125, 124,
    111, 113, 128, 128, 126, 111, 126, 128, 129, 129, 127, 126,
    113, 115, 130, 130, 128, 113, 128, 130, 131, 131, 129, 128,
    115, 117, 132, 132, 130, 115, 130, 132, 133, 133, 131, 130,
    117, 119, 134, 134, 132, 117, 132, 134, 135, 135, 133, 132,
    119, 121, 136, 136, 134, 119, 134, 136, 137, 137, 135, 134,
    121, 107, 122,
];
