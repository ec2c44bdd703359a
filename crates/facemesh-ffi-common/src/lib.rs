//! Common FFI utilities for facemesh C-compatible interfaces.
//!
//! Helpers shared by the bridge's C ABI layer: pointer-to-reference
//! conversion with null checks, boxed handle release, and a panic guard so
//! unwinds never cross the boundary.
//!
//! # Memory Ownership
//!
//! - Handles created with `Box::into_raw` are owned by the caller until they
//!   are passed back to the matching free function
//! - NULL pointers are handled safely (no-op for free functions, `None` for
//!   slice conversion)
//! - Slices built from raw pointers borrow the caller's memory for the
//!   duration of the call only

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{self, AssertUnwindSafe};
use std::slice;

/// Safely convert a C string pointer to a Rust string reference.
///
/// # Returns
/// `Ok(&str)` on success, `Err(&'static str)` with error message on failure.
///
/// # Safety
/// The pointer must be valid and null-terminated, or null.
pub unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Result<&'a str, &'static str> {
    if ptr.is_null() {
        return Err("null pointer");
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| "invalid UTF-8")
}

/// Safely free a boxed value.
///
/// Does nothing if the pointer is null.
///
/// # Safety
/// The pointer must have been allocated by `Box::into_raw()` or be null,
/// and must not be freed twice.
#[inline]
pub unsafe fn free_boxed<T>(ptr: *mut T) {
    if !ptr.is_null() {
        unsafe {
            let _ = Box::from_raw(ptr);
        }
    }
}

/// Borrow `len` elements starting at `ptr` as a shared slice.
///
/// Returns `None` for a null pointer. A zero length yields an empty slice
/// without dereferencing `ptr`.
///
/// # Safety
/// If non-null, `ptr` must be valid for reads of `len` elements for `'a`.
#[inline]
pub unsafe fn slice_from_raw<'a, T>(ptr: *const T, len: usize) -> Option<&'a [T]> {
    if ptr.is_null() {
        return None;
    }
    if len == 0 {
        return Some(Default::default());
    }
    Some(unsafe { slice::from_raw_parts(ptr, len) })
}

/// Borrow `len` elements starting at `ptr` as a mutable slice.
///
/// Returns `None` for a null pointer. A zero length yields an empty slice
/// without dereferencing `ptr`.
///
/// # Safety
/// If non-null, `ptr` must be valid for writes of `len` elements for `'a`
/// and must not alias any other live reference.
#[inline]
pub unsafe fn slice_from_raw_mut<'a, T>(ptr: *mut T, len: usize) -> Option<&'a mut [T]> {
    if ptr.is_null() {
        return None;
    }
    if len == 0 {
        return Some(Default::default());
    }
    Some(unsafe { slice::from_raw_parts_mut(ptr, len) })
}

/// Run `f`, returning `fallback` if it panics.
///
/// Unwinding into a C caller is undefined behavior, so every exported
/// function routes its body through this guard.
pub fn guard<R>(fallback: R, f: impl FnOnce() -> R) -> R {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or(fallback)
}

/// Generate a version function that returns a static C string.
///
/// # Example
/// ```ignore
/// facemesh_ffi_common::define_version_fn!(my_lib_version);
/// // Expands to:
/// // #[no_mangle]
/// // pub extern "C" fn my_lib_version() -> *const c_char {
/// //     concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
/// // }
/// ```
#[macro_export]
macro_rules! define_version_fn {
    ($fn_name:ident) => {
        #[no_mangle]
        pub extern "C" fn $fn_name() -> *const std::os::raw::c_char {
            concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const std::os::raw::c_char
        }
    };
}

/// Generate a handle free function for a given type.
///
/// Null is a no-op. Drop panics are swallowed by [`guard`].
///
/// # Example
/// ```ignore
/// facemesh_ffi_common::define_handle_free!(my_handle_free, MyHandle);
/// // Expands to:
/// // #[no_mangle]
/// // #[allow(clippy::not_unsafe_ptr_arg_deref)]
/// // pub extern "C" fn my_handle_free(ptr: *mut MyHandle) {
/// //     facemesh_ffi_common::guard((), || unsafe { facemesh_ffi_common::free_boxed(ptr) });
/// // }
/// ```
#[macro_export]
macro_rules! define_handle_free {
    ($fn_name:ident, $handle_type:ty) => {
        #[no_mangle]
        #[allow(clippy::not_unsafe_ptr_arg_deref)]
        pub extern "C" fn $fn_name(ptr: *mut $handle_type) {
            $crate::guard((), || unsafe { $crate::free_boxed(ptr) });
        }
    };
}
