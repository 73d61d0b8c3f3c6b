pub mod ffi {
    //! C ABI for the four box operations.
    //!
    //! Boxes are passed as row-major `float` buffers of `len * 5` values.
    //! Results are allocated here and handed to the caller, who must release
    //! them with the matching `rbox_free_*_ffi` function.

    use std::ffi::{c_float, c_int};
    use std::{ptr, slice};
    use crate::common::{BoxSet, ComputeDevice, RBOX_DIM};
    use crate::engines::{backend_for, Backend};
    use crate::RboxError;

    pub const RBOX_OK: c_int = 0;
    pub const RBOX_NULL_POINTER: c_int = -4;

    unsafe fn boxes_from_raw(data: *const c_float, len: usize) -> Result<BoxSet, c_int> {
        if len == 0 {
            return Ok(BoxSet::new());
        }
        if data.is_null() {
            return Err(RBOX_NULL_POINTER);
        }
        let count = len.checked_mul(RBOX_DIM).ok_or_else(|| {
            RboxError::ShapeMismatch(format!("{len} boxes overflow the buffer size")).code()
        })?;
        let values = unsafe { slice::from_raw_parts(data, count) };
        BoxSet::from_flat(values).map_err(|err| err.code())
    }

    unsafe fn hand_over<T>(values: Vec<T>, out: *mut *mut T, out_len: *mut usize) {
        let len = values.len();
        let raw = Box::into_raw(values.into_boxed_slice()) as *mut T;
        unsafe {
            *out = raw;
            *out_len = len;
        }
    }

    unsafe fn release<T>(data: *mut T, len: usize) {
        if !data.is_null() {
            drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(data, len)) });
        }
    }

    unsafe fn iou_ffi(
        device: ComputeDevice,
        boxes_a: *const c_float,
        len_a: usize,
        boxes_b: *const c_float,
        len_b: usize,
        out_iou: *mut *mut c_float,
        out_len: *mut usize,
    ) -> c_int {
        if out_iou.is_null() || out_len.is_null() {
            return RBOX_NULL_POINTER;
        }
        let a = match unsafe { boxes_from_raw(boxes_a, len_a) } {
            Ok(boxes) => boxes,
            Err(code) => return code,
        };
        let b = match unsafe { boxes_from_raw(boxes_b, len_b) } {
            Ok(boxes) => boxes,
            Err(code) => return code,
        };

        match backend_for(device) {
            Ok(backend) => {
                let iou: Vec<f32> = backend.iou_matrix(&a, &b).iter().copied().collect();
                unsafe { hand_over(iou, out_iou, out_len) };
                RBOX_OK
            }
            Err(err) => {
                log::error!("rbox_2d_iou: {err}");
                err.code()
            }
        }
    }

    unsafe fn nms_ffi(
        device: ComputeDevice,
        boxes: *const c_float,
        len: usize,
        iou_threshold: c_float,
        out_keep: *mut *mut usize,
        out_len: *mut usize,
    ) -> c_int {
        if out_keep.is_null() || out_len.is_null() {
            return RBOX_NULL_POINTER;
        }
        let boxes = match unsafe { boxes_from_raw(boxes, len) } {
            Ok(boxes) => boxes,
            Err(code) => return code,
        };

        match backend_for(device) {
            Ok(backend) => {
                let keep = backend.suppress(&boxes, iou_threshold);
                unsafe { hand_over(keep, out_keep, out_len) };
                RBOX_OK
            }
            Err(err) => {
                log::error!("rbox_2d_nms: {err}");
                err.code()
            }
        }
    }

    /// Row-major `len_a x len_b` IoU matrix on the reference engine.
    ///
    /// # Safety
    /// `boxes_a` and `boxes_b` must point to `len * 5` floats (or be null with
    /// a zero length); `out_iou` and `out_len` must be writable.
    #[no_mangle]
    pub unsafe extern "C" fn rbox_2d_iou_ffi(
        boxes_a: *const c_float,
        len_a: usize,
        boxes_b: *const c_float,
        len_b: usize,
        out_iou: *mut *mut c_float,
        out_len: *mut usize,
    ) -> c_int {
        unsafe { iou_ffi(ComputeDevice::Reference, boxes_a, len_a, boxes_b, len_b, out_iou, out_len) }
    }

    /// Same as `rbox_2d_iou_ffi` on the accelerated engine.
    ///
    /// # Safety
    /// See `rbox_2d_iou_ffi`.
    #[no_mangle]
    pub unsafe extern "C" fn rbox_2d_iou_cuda_ffi(
        boxes_a: *const c_float,
        len_a: usize,
        boxes_b: *const c_float,
        len_b: usize,
        out_iou: *mut *mut c_float,
        out_len: *mut usize,
    ) -> c_int {
        unsafe { iou_ffi(ComputeDevice::Accelerated(0), boxes_a, len_a, boxes_b, len_b, out_iou, out_len) }
    }

    /// Kept indices of boxes sorted by descending score, on the reference engine.
    ///
    /// # Safety
    /// `boxes` must point to `len * 5` floats (or be null with a zero length);
    /// `out_keep` and `out_len` must be writable.
    #[no_mangle]
    pub unsafe extern "C" fn rbox_2d_nms_ffi(
        boxes: *const c_float,
        len: usize,
        iou_threshold: c_float,
        out_keep: *mut *mut usize,
        out_len: *mut usize,
    ) -> c_int {
        unsafe { nms_ffi(ComputeDevice::Reference, boxes, len, iou_threshold, out_keep, out_len) }
    }

    /// Same as `rbox_2d_nms_ffi` on the accelerated engine.
    ///
    /// # Safety
    /// See `rbox_2d_nms_ffi`.
    #[no_mangle]
    pub unsafe extern "C" fn rbox_2d_nms_cuda_ffi(
        boxes: *const c_float,
        len: usize,
        iou_threshold: c_float,
        out_keep: *mut *mut usize,
        out_len: *mut usize,
    ) -> c_int {
        unsafe { nms_ffi(ComputeDevice::Accelerated(0), boxes, len, iou_threshold, out_keep, out_len) }
    }

    /// Releases a matrix returned by the IoU functions.
    ///
    /// # Safety
    /// `data` and `len` must come from one successful IoU call, released once.
    #[no_mangle]
    pub unsafe extern "C" fn rbox_free_iou_ffi(data: *mut c_float, len: usize) {
        unsafe { release(data, len) }
    }

    /// Releases indices returned by the NMS functions.
    ///
    /// # Safety
    /// `data` and `len` must come from one successful NMS call, released once.
    #[no_mangle]
    pub unsafe extern "C" fn rbox_free_keep_ffi(data: *mut usize, len: usize) {
        unsafe { release(data, len) }
    }
}
