use http::StatusCode;
use strum::IntoEnumIterator;

use crate::{ExpressiveError, Message};

macro_rules! error_kinds {
    ($($(#[$attr:meta])* $variant:ident => $code:literal, $ctor:ident;)*) => {
        /// Well-known HTTP error statuses with a named constructor each
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            strum::Display,
            strum::EnumIter,
            strum::EnumString,
            strum::IntoStaticStr,
        )]
        pub enum ErrorKind {
            $($(#[$attr])* $variant,)*
        }

        impl ErrorKind {
            /// Numeric status code
            pub const fn code(self) -> u16 {
                match self {
                    $(Self::$variant => $code,)*
                }
            }

            /// Machine-readable snake_case name (e.g. `not_found`)
            pub const fn error_type(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($ctor),)*
                }
            }
        }

        impl ExpressiveError {
            $(
                #[doc = concat!("`", stringify!($code), " ", stringify!($variant), "` error")]
                pub fn $ctor(message: impl Into<Message>) -> Self {
                    ErrorKind::$variant.error(message)
                }
            )*
        }
    };
}

error_kinds! {
    BadRequest => 400, bad_request;
    Unauthorized => 401, unauthorized;
    PaymentRequired => 402, payment_required;
    Forbidden => 403, forbidden;
    NotFound => 404, not_found;
    MethodNotAllowed => 405, method_not_allowed;
    NotAcceptable => 406, not_acceptable;
    ProxyAuthenticationRequired => 407, proxy_authentication_required;
    RequestTimeout => 408, request_timeout;
    Conflict => 409, conflict;
    Gone => 410, gone;
    LengthRequired => 411, length_required;
    PreconditionFailed => 412, precondition_failed;
    PayloadTooLarge => 413, payload_too_large;
    URITooLong => 414, uri_too_long;
    UnsupportedMediaType => 415, unsupported_media_type;
    RangeNotSatisfiable => 416, range_not_satisfiable;
    ExpectationFailed => 417, expectation_failed;
    ImATeapot => 418, im_a_teapot;
    MisdirectedRequest => 421, misdirected_request;
    #[strum(to_string = "UnprocessableContent", serialize = "UnprocessableEntity")]
    UnprocessableContent => 422, unprocessable_content;
    Locked => 423, locked;
    FailedDependency => 424, failed_dependency;
    TooEarly => 425, too_early;
    UpgradeRequired => 426, upgrade_required;
    PreconditionRequired => 428, precondition_required;
    TooManyRequests => 429, too_many_requests;
    RequestHeaderFieldsTooLarge => 431, request_header_fields_too_large;
    UnavailableForLegalReasons => 451, unavailable_for_legal_reasons;
    InternalServerError => 500, internal_server_error;
    NotImplemented => 501, not_implemented;
    BadGateway => 502, bad_gateway;
    ServiceUnavailable => 503, service_unavailable;
    GatewayTimeout => 504, gateway_timeout;
    HTTPVersionNotSupported => 505, http_version_not_supported;
    VariantAlsoNegotiates => 506, variant_also_negotiates;
    InsufficientStorage => 507, insufficient_storage;
    LoopDetected => 508, loop_detected;
    NotExtended => 510, not_extended;
    NetworkAuthenticationRequired => 511, network_authentication_required;
}

impl ErrorKind {
    /// Status code as an [`http::StatusCode`]
    pub fn status(self) -> StatusCode {
        StatusCode::from_u16(self.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Constructor name (e.g. `NotFound`)
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Message used when none is given
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::ImATeapot => "I'm a teapot",
            _ => "",
        }
    }

    /// Build an unsent error of this kind
    pub fn error(self, message: impl Into<Message>) -> ExpressiveError {
        ExpressiveError::new(self.status(), message)
    }

    /// Kind whose code matches `status`, if it is in the table
    pub fn from_status(status: StatusCode) -> Option<Self> {
        Self::iter().find(|kind| kind.code() == status.as_u16())
    }
}

impl From<ErrorKind> for ExpressiveError {
    fn from(kind: ErrorKind) -> Self {
        kind.error(kind.default_message())
    }
}

impl ExpressiveError {
    /// Table entry matching this error's status
    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::from_status(self.status())
    }
}
