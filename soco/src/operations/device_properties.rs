//! DeviceProperties service operations

use soap_client::envelope::arg;

use crate::define_upnp_operation;
use crate::operation::Validate;

define_upnp_operation! {
    /// Switch the white status light on the front of the player
    operation: SetLEDStateOperation,
    action: "SetLEDState",
    service: DeviceProperties,
    request: {
        desired_led_state: bool,
    },
    response: (),
    payload: |req| arg("DesiredLEDState", if req.desired_led_state { "On" } else { "Off" }),
    parse: |_response| Ok(()),
}

impl Validate for SetLEDStateOperationRequest {}
