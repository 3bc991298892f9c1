/// Messages sent from the upload worker to the controller.
///
/// For one task they always arrive as `Total` (once, if the file could be
/// opened), any number of `Progress`, exactly one `Result`, then `Finished`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Total(u64),
    Progress(u64),
    Result(UploadOutcome),
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The HTTP exchange completed, whatever the status.
    Response { status: u16, body: String },
    /// The request never produced a response.
    Failed(String),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Response { status: 200, .. })
    }

    pub fn to_notice(&self) -> Notice {
        match self {
            Self::Response { status: 200, body } => Notice::Info {
                title: "Done".to_string(),
                message: format!("Your link: {}", body),
            },
            Self::Response { body, .. } => Notice::Warning {
                title: "Error".to_string(),
                message: body.clone(),
            },
            Self::Failed(reason) => Notice::Warning {
                title: "Error".to_string(),
                message: reason.clone(),
            },
        }
    }
}

/// A modal message the UI has to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info { title: String, message: String },
    Warning { title: String, message: String },
}

impl Notice {
    pub fn title(&self) -> &str {
        match self {
            Self::Info { title, .. } | Self::Warning { title, .. } => title,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Info { message, .. } | Self::Warning { message, .. } => message,
        }
    }
}
