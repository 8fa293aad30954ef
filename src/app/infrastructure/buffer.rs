/// Read a byte range from an FLTK TextBuffer without leaking the C-allocated copy.
///
/// # Why This Exists
///
/// fltk-rs's `TextBuffer::text_range()` calls FLTK's `Fl_Text_Buffer_text_range()`
/// which returns a `malloc()`'d C string. The Rust wrapper copies it to a String
/// but never frees the original pointer. The modify callback reads every
/// insertion through this helper, so the leak would grow with each keystroke.
pub fn buffer_text_range_no_leak(buf: &fltk::text::TextBuffer, start: i32, end: i32) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text_range(
            buf: *mut std::ffi::c_void,
            start: std::ffi::c_int,
            end: std::ffi::c_int,
        ) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    if end <= start {
        return String::new();
    }

    // SAFETY: We call FLTK's C API directly to get the text pointer, copy it
    // to a Rust String, then free the C pointer. The sequence is:
    //   1. buf.as_ptr() returns the internal FLTK buffer pointer (valid while buf exists)
    //   2. Fl_Text_Buffer_text_range returns a malloc'd, null-terminated C string (or null)
    //   3. CStr::from_ptr reads until null terminator (safe for valid C string)
    //   4. to_string_lossy handles any invalid UTF-8 gracefully
    //   5. free() releases the malloc'd memory (matches FLTK's allocation)
    unsafe {
        let inner = buf.as_ptr() as *mut std::ffi::c_void;
        let ptr = Fl_Text_Buffer_text_range(inner, start, end);
        if ptr.is_null() {
            return String::new();
        }
        let cstr = std::ffi::CStr::from_ptr(ptr);
        let result = cstr.to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        result
    }
}
