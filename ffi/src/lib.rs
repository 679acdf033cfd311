//! C-ABI wrapper around `fleet-core` for the iOS and Android hosts.
//!
//! # Overview
//! Exposes the vehicle CRUD requests and the listing search predicate through
//! `extern "C"` functions. The host executes each request with its native
//! HTTP stack and hands the response back to the matching `fleet_parse_*`.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `build_*` / `parse_*` mirror the core client 1:1.
//! - A single `FfiFleetResult` envelope with `FfiDataTag` + `void* data`
//!   conveys payloads and errors uniformly.
//! - The caller owns every returned pointer and releases it with the
//!   matching `fleet_free_*` function.

pub mod types;

use std::os::raw::c_char;
use std::panic::catch_unwind;

use fleet_core::{ApiError, HttpResponse, VehicleClient, VehicleId, VehicleInput};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url`.
///
/// Returns null if `base_url` is null or not UTF-8. Free with
/// `fleet_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_client_new(base_url: *const c_char) -> *mut FfiFleetClient {
    catch_unwind(|| match unsafe { read_str(base_url) } {
        Some(url) => Box::into_raw(Box::new(FfiFleetClient {
            inner: VehicleClient::new(url),
        })),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `fleet_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_client_free(client: *mut FfiFleetClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Collect the five form fields. Null optionals become empty strings; a null
/// or blank required field yields `None`.
///
/// # Safety
/// Every non-null pointer must be a valid NUL-terminated string.
unsafe fn read_input(
    placa: *const c_char,
    marca: *const c_char,
    modelo: *const c_char,
    ano: *const c_char,
    cor: *const c_char,
) -> Option<VehicleInput> {
    let input = unsafe {
        VehicleInput {
            placa: read_str(placa)?.to_string(),
            marca: read_str(marca)?.to_string(),
            modelo: read_str(modelo)?.to_string(),
            ano: read_str(ano).unwrap_or_default().to_string(),
            cor: read_str(cor).unwrap_or_default().to_string(),
        }
    };
    input.has_required_fields().then_some(input)
}

/// # Safety
/// `id` must be null or a valid NUL-terminated string.
unsafe fn read_id(id: *const c_char) -> Option<VehicleId> {
    unsafe { read_str(id) }?.parse().ok()
}

/// Build the request that fetches the whole collection.
///
/// Returns null if `client` is null. Free with `fleet_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_build_list_vehicles(client: *const FfiFleetClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_vehicles())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request that creates a vehicle.
///
/// `ano` and `cor` may be null. Returns null if `client` is null or if
/// `placa`, `marca` or `modelo` is null or empty.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_build_create_vehicle(
    client: *const FfiFleetClient,
    placa: *const c_char,
    marca: *const c_char,
    modelo: *const c_char,
    ano: *const c_char,
    cor: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(input) = (unsafe { read_input(placa, marca, modelo, ano, cor) }) else {
            return std::ptr::null_mut();
        };
        match client.inner.build_create_vehicle(&input) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request that overwrites vehicle `id` with the given fields.
///
/// Same argument rules as `fleet_build_create_vehicle`; also null if `id`
/// is null.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_build_update_vehicle(
    client: *const FfiFleetClient,
    id: *const c_char,
    placa: *const c_char,
    marca: *const c_char,
    modelo: *const c_char,
    ano: *const c_char,
    cor: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(id) = (unsafe { read_id(id) }) else {
            return std::ptr::null_mut();
        };
        let Some(input) = (unsafe { read_input(placa, marca, modelo, ano, cor) }) else {
            return std::ptr::null_mut();
        };
        match client.inner.build_update_vehicle(&id, &input) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request that deletes vehicle `id`. Only call this after the
/// user confirmed the removal.
///
/// Returns null if `client` or `id` is null.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_build_delete_vehicle(
    client: *const FfiFleetClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match unsafe { read_id(id) } {
            Some(id) => FfiHttpRequest::from_core(client.inner.build_delete_vehicle(&id)),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Shared prologue of every `fleet_parse_*`: null checks, response
/// conversion and panic containment.
fn parse_with(
    op: &str,
    client: *const FfiFleetClient,
    response: *const FfiHttpResponse,
    parse: impl FnOnce(&VehicleClient, HttpResponse) -> *mut FfiFleetResult,
) -> *mut FfiFleetResult {
    catch_unwind(std::panic::AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiFleetResult::null_arg("client");
        }
        if response.is_null() {
            return FfiFleetResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let body = unsafe { read_str(resp.body) }.unwrap_or_default().to_string();
        parse(
            &client.inner,
            HttpResponse {
                status: resp.status,
                headers: Vec::new(),
                body,
            },
        )
    }))
    .unwrap_or_else(|_| FfiFleetResult::panic(&format!("panic in fleet_parse_{op}")))
}

fn envelope<T>(
    result: Result<T, ApiError>,
    ok: impl FnOnce(T) -> *mut FfiFleetResult,
) -> *mut FfiFleetResult {
    match result {
        Ok(value) => ok(value),
        Err(e) => FfiFleetResult::from_error(e),
    }
}

/// Parse a list response. `data_tag = VehicleList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_parse_list_vehicles(
    client: *const FfiFleetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiFleetResult {
    parse_with("list_vehicles", client, response, |c, resp| {
        envelope(c.parse_list_vehicles(resp), FfiFleetResult::ok_vehicle_list)
    })
}

/// Parse a create response. `data_tag = Vehicle` on success.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_parse_create_vehicle(
    client: *const FfiFleetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiFleetResult {
    parse_with("create_vehicle", client, response, |c, resp| {
        envelope(c.parse_create_vehicle(resp), FfiFleetResult::ok_vehicle)
    })
}

/// Parse an update response. `data_tag = Vehicle` on success.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_parse_update_vehicle(
    client: *const FfiFleetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiFleetResult {
    parse_with("update_vehicle", client, response, |c, resp| {
        envelope(c.parse_update_vehicle(resp), FfiFleetResult::ok_vehicle)
    })
}

/// Parse a delete response. `data_tag = None` on success; only then should
/// the host drop the vehicle from its list.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_parse_delete_vehicle(
    client: *const FfiFleetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiFleetResult {
    parse_with("delete_vehicle", client, response, |c, resp| {
        envelope(c.parse_delete_vehicle(resp), |()| FfiFleetResult::ok_empty())
    })
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Whether `vehicle` belongs in the listing filtered by `term`: model, brand
/// or plate contains it, ignoring case. A null or empty term matches.
/// A null or malformed vehicle never matches.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_vehicle_matches(vehicle: *const FfiVehicle, term: *const c_char) -> bool {
    catch_unwind(|| {
        if vehicle.is_null() {
            return false;
        }
        let term = unsafe { read_str(term) }.unwrap_or_default();
        match unsafe { (*vehicle).to_core() } {
            Some(v) => v.matches(term),
            None => false,
        }
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by any `fleet_build_*` function. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHttpRequest::free(req) });
}

/// Free a result returned by any `fleet_parse_*` function. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_free_result(result: *mut FfiFleetResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiFleetResult::free(result) });
}

/// Free a C string allocated by this library. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn fleet_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
