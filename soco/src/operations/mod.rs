//! Speaker operations organized by service
//!
//! Each submodule holds the actions of one UPnP service.

pub mod av_transport;
pub mod device_properties;
pub mod rendering_control;

pub use av_transport::{
    GetPositionInfoOperation, GetPositionInfoResponse, NextOperation, PauseOperation, PlayMode,
    PlayOperation, PreviousOperation, SetAVTransportURIOperation, SetPlayModeOperation,
    StartAutoplayOperation, StopOperation,
};
pub use device_properties::SetLEDStateOperation;
pub use rendering_control::{
    GetBassOperation, GetTrebleOperation, GetVolumeOperation, SetBassOperation,
    SetLoudnessOperation, SetMuteOperation, SetTrebleOperation, SetVolumeOperation,
};
