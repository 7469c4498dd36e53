/// The UPnP services a speaker exposes that this crate talks to
///
/// Each service has a fixed control endpoint and service URN; nothing is
/// discovered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// AVTransport service - Controls playback (play, pause, stop, seek, etc.)
    AVTransport,

    /// RenderingControl service - Controls audio rendering (volume, mute, EQ)
    RenderingControl,

    /// DeviceProperties service - Device settings such as the status light
    DeviceProperties,

    /// ContentDirectory service - Media library browsing. No operation in
    /// this crate uses it yet.
    ContentDirectory,
}

/// Contains the endpoint and service URI information for a UPnP service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// The HTTP control path for this service, relative to `http://<host>:<port>`
    pub endpoint: &'static str,

    /// The UPnP service URI used in SOAP requests
    pub service_uri: &'static str,
}

impl Service {
    /// Get the name of this service as a string
    pub fn name(&self) -> &'static str {
        match self {
            Service::AVTransport => "AVTransport",
            Service::RenderingControl => "RenderingControl",
            Service::DeviceProperties => "DeviceProperties",
            Service::ContentDirectory => "ContentDirectory",
        }
    }

    /// Get the service information (endpoint and URI) for this service
    pub fn info(&self) -> ServiceInfo {
        match self {
            Service::AVTransport => ServiceInfo {
                endpoint: "/MediaRenderer/AVTransport/Control",
                service_uri: "urn:schemas-upnp-org:service:AVTransport:1",
            },
            Service::RenderingControl => ServiceInfo {
                endpoint: "/MediaRenderer/RenderingControl/Control",
                service_uri: "urn:schemas-upnp-org:service:RenderingControl:1",
            },
            Service::DeviceProperties => ServiceInfo {
                endpoint: "/DeviceProperties/Control",
                service_uri: "urn:schemas-upnp-org:service:DeviceProperties:1",
            },
            Service::ContentDirectory => ServiceInfo {
                endpoint: "/MediaServer/ContentDirectory/Control",
                service_uri: "urn:schemas-upnp-org:service:ContentDirectory:1",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Service::AVTransport, "/MediaRenderer/AVTransport/Control", "urn:schemas-upnp-org:service:AVTransport:1")]
    #[case(Service::RenderingControl, "/MediaRenderer/RenderingControl/Control", "urn:schemas-upnp-org:service:RenderingControl:1")]
    #[case(Service::DeviceProperties, "/DeviceProperties/Control", "urn:schemas-upnp-org:service:DeviceProperties:1")]
    #[case(Service::ContentDirectory, "/MediaServer/ContentDirectory/Control", "urn:schemas-upnp-org:service:ContentDirectory:1")]
    fn test_service_info(#[case] service: Service, #[case] endpoint: &str, #[case] uri: &str) {
        let info = service.info();
        assert_eq!(info.endpoint, endpoint);
        assert_eq!(info.service_uri, uri);
        assert!(info.service_uri.ends_with(&format!("{}:1", service.name())));
    }
}
