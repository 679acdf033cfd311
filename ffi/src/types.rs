//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations: owned
//! `*mut c_char` strings, raw pointer + length pairs instead of `Vec`, and
//! enums with explicit discriminants. Conversions and the matching frees live
//! here so `lib.rs` stays focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use fleet_core::{ApiError, HttpMethod, Vehicle, VehicleClient, VehicleId};

/// Opaque handle to a `VehicleClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiFleetClient {
    pub(crate) inner: VehicleClient,
}

/// Copy `s` into a heap C string owned by the caller. Interior NULs cannot
/// be represented and are dropped.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let bytes: Vec<u8> = s.into_bytes().into_iter().filter(|b| *b != 0).collect();
    CString::new(bytes).unwrap_or_default().into_raw()
}

fn opt_c_string(s: Option<String>) -> *mut c_char {
    s.map_or(std::ptr::null_mut(), into_c_string)
}

/// Borrow a caller-owned C string as UTF-8. `None` for null or invalid UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives the
/// returned borrow.
pub(crate) unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Release a string produced by `into_c_string`. Null is ignored.
pub(crate) fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request for the host to execute. `body` is null for GET/DELETE.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: fleet_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: into_c_string(k),
                value: into_c_string(v),
            })
            .collect();
        let (headers, headers_len) = leak_slice(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: into_c_string(req.path),
            headers,
            headers_len,
            body: opt_c_string(req.body),
        }))
    }

    /// Reclaim a request produced by `from_core`.
    ///
    /// # Safety
    /// `ptr` must come from `from_core` and not have been freed already.
    pub(crate) unsafe fn free(ptr: *mut Self) {
        let req = unsafe { Box::from_raw(ptr) };
        free_c_string(req.path);
        free_c_string(req.body);
        for header in unsafe { reclaim_slice(req.headers, req.headers_len) } {
            free_c_string(header.key);
            free_c_string(header.value);
        }
    }
}

/// Hand a `Vec` to C as pointer + length. Empty vectors become null.
fn leak_slice<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let boxed = items.into_boxed_slice();
    (Box::into_raw(boxed) as *mut T, len)
}

/// # Safety
/// `ptr`/`len` must come from `leak_slice`.
unsafe fn reclaim_slice<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

// ---------------------------------------------------------------------------
// Response input (caller-provided)
// ---------------------------------------------------------------------------

/// An HTTP response as C data, built by the host on its own stack. The FFI
/// layer reads but never frees these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Vehicle data
// ---------------------------------------------------------------------------

/// A vehicle record. `id` is the backend id in text form; `ano` and `cor`
/// are null when the backend sent nothing.
#[repr(C)]
pub struct FfiVehicle {
    pub id: *mut c_char,
    pub placa: *mut c_char,
    pub marca: *mut c_char,
    pub modelo: *mut c_char,
    pub ano: *mut c_char,
    pub cor: *mut c_char,
}

impl FfiVehicle {
    fn from_core(v: Vehicle) -> Self {
        FfiVehicle {
            id: into_c_string(v.id.to_string()),
            placa: into_c_string(v.placa),
            marca: into_c_string(v.marca),
            modelo: into_c_string(v.modelo),
            ano: opt_c_string(v.ano),
            cor: opt_c_string(v.cor),
        }
    }

    /// Rebuild a core vehicle from a caller-supplied record. `None` if a
    /// required field is null or not UTF-8.
    ///
    /// # Safety
    /// Every non-null field must be a valid NUL-terminated string.
    pub(crate) unsafe fn to_core(&self) -> Option<Vehicle> {
        unsafe {
            Some(Vehicle {
                id: read_str(self.id)?.parse::<VehicleId>().ok()?,
                placa: read_str(self.placa)?.to_string(),
                marca: read_str(self.marca)?.to_string(),
                modelo: read_str(self.modelo)?.to_string(),
                ano: read_str(self.ano).map(str::to_string),
                cor: read_str(self.cor).map(str::to_string),
            })
        }
    }

    fn free_fields(&self) {
        for field in [self.id, self.placa, self.marca, self.modelo, self.ano, self.cor] {
            free_c_string(field);
        }
    }
}

#[repr(C)]
pub struct FfiVehicleList {
    pub items: *mut FfiVehicle,
    pub len: u32,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiFleetResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Deserialization = 3,
    Serialization = 4,
    Transport = 5,
    Panic = 6,
    NullArg = 7,
}

/// Tag that tells `fleet_free_result` what `FfiFleetResult::data` points to.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Vehicle = 1,
    VehicleList = 2,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null and `data`
/// points to the payload tagged by `data_tag`. On failure `error_message`
/// is a human-readable C string and `data` is null.
#[repr(C)]
pub struct FfiFleetResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiFleetResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: Option<String>,
        http_status: u16,
        data_tag: FfiDataTag,
        data: *mut std::ffi::c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiFleetResult {
            error_code,
            error_message: opt_c_string(error_message),
            http_status,
            data_tag,
            data,
        }))
    }

    pub(crate) fn ok_vehicle(vehicle: Vehicle) -> *mut Self {
        let data = Box::into_raw(Box::new(FfiVehicle::from_core(vehicle)));
        Self::boxed(FfiErrorCode::Ok, None, 0, FfiDataTag::Vehicle, data.cast())
    }

    pub(crate) fn ok_vehicle_list(vehicles: Vec<Vehicle>) -> *mut Self {
        let items: Vec<FfiVehicle> = vehicles.into_iter().map(FfiVehicle::from_core).collect();
        let (items, len) = leak_slice(items);
        let data = Box::into_raw(Box::new(FfiVehicleList { items, len }));
        Self::boxed(FfiErrorCode::Ok, None, 0, FfiDataTag::VehicleList, data.cast())
    }

    pub(crate) fn ok_empty() -> *mut Self {
        Self::boxed(FfiErrorCode::Ok, None, 0, FfiDataTag::None, std::ptr::null_mut())
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (code, status) = match &err {
            ApiError::NotFound => (FfiErrorCode::NotFound, 404),
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::DeserializationError(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::SerializationError(_) => (FfiErrorCode::Serialization, 0),
            ApiError::Transport(_) => (FfiErrorCode::Transport, 0),
        };
        Self::boxed(code, Some(err.to_string()), status, FfiDataTag::None, std::ptr::null_mut())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = format!("null argument: {name}");
        Self::boxed(FfiErrorCode::NullArg, Some(msg), 0, FfiDataTag::None, std::ptr::null_mut())
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::Panic,
            Some(msg.to_string()),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Reclaim a result and its tagged payload.
    ///
    /// # Safety
    /// `ptr` must come from one of the constructors above and not have been
    /// freed already.
    pub(crate) unsafe fn free(ptr: *mut Self) {
        let result = unsafe { Box::from_raw(ptr) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Vehicle => {
                let vehicle = unsafe { Box::from_raw(result.data.cast::<FfiVehicle>()) };
                vehicle.free_fields();
            }
            FfiDataTag::VehicleList => {
                let list = unsafe { Box::from_raw(result.data.cast::<FfiVehicleList>()) };
                for vehicle in unsafe { reclaim_slice(list.items, list.len) } {
                    vehicle.free_fields();
                }
            }
            FfiDataTag::None => {}
        }
    }
}
