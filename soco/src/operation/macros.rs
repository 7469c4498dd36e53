//! Declarative macro for UPnP operation definitions
//!
//! Instead of writing the request struct, the marker type and the
//! [`SonosOperation`](crate::operation::SonosOperation) impl by hand, each
//! action is declared once with its payload and parse expressions.

/// Define a UPnP operation with minimal boilerplate
///
/// Generates `<Name>Request` with the listed public fields, the `<Name>`
/// marker type and its `SonosOperation` impl. The request type must also
/// implement `Validate`; an empty `impl Validate for ... {}` accepts
/// everything.
///
/// # Example
/// ```rust,ignore
/// define_upnp_operation! {
///     /// Start playback
///     operation: PlayOperation,
///     action: "Play",
///     service: AVTransport,
///     request: {
///         instance_id: u32,
///         speed: String,
///     },
///     response: (),
///     payload: |req| [arg("InstanceID", req.instance_id), arg("Speed", &req.speed)].concat(),
///     parse: |_response| Ok(()),
/// }
/// ```
#[macro_export]
macro_rules! define_upnp_operation {
    (
        $(#[$meta:meta])*
        operation: $op_struct:ident,
        action: $action:literal,
        service: $service:ident,
        request: {
            $($field:ident: $field_type:ty),* $(,)?
        },
        response: $response_type:ty,
        payload: |$req_param:ident| $payload_expr:expr,
        parse: |$resp_param:ident| $parse_expr:expr $(,)?
    ) => {
        paste::paste! {
            #[doc = "Request for the `" $action "` action"]
            #[derive(serde::Serialize, Clone, Debug, PartialEq)]
            pub struct [<$op_struct Request>] {
                $(pub $field: $field_type,)*
            }

            $(#[$meta])*
            pub struct $op_struct;

            impl $crate::operation::SonosOperation for $op_struct {
                type Request = [<$op_struct Request>];
                type Response = $response_type;

                const SERVICE: $crate::service::Service = $crate::service::Service::$service;
                const ACTION: &'static str = $action;

                fn build_payload(
                    request: &Self::Request,
                ) -> Result<String, $crate::operation::ValidationError> {
                    $crate::operation::Validate::validate(request)?;
                    let $req_param = request;
                    Ok($payload_expr)
                }

                fn parse_response(
                    response: &soap_client::SoapResponse,
                ) -> Result<Self::Response, $crate::error::ApiError> {
                    let $resp_param = response;
                    $parse_expr
                }
            }
        }
    };
}
