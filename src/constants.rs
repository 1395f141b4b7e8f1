pub mod env {

    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

    pub const SECRET_KEY: &str = "SECRET_KEY";

    pub const DATABASE_URL: &str = "DATABASE_URL";
}

pub mod messages {

    pub const FIELDS_REQUIRED: &str = "All fields are required.";

    pub const INVALID_REQUEST: &str = "Invalid request";

    pub const UNSUPPORTED_FORM: &str =
        "Unsupported content type. Send the case fields as a form.";

    pub const NO_QUESTION: &str = "No question provided";

    pub const ASSISTANT_FAILED: &str = "AI service error";

    pub const ASSISTANT_NOT_CONFIGURED: &str = "Error: OpenAI API key not configured.";

    pub const ASSISTANT_UNAVAILABLE: &str = "I'm currently unable to connect to the AI service.";

    pub const CASE_LOOKUP_FAILED: &str = "An error occurred";

    pub const PDF_NOT_FOUND: &str = "PDF not found.";
}

pub mod limits {

    pub const DEFAULT_HISTORY_LIMIT: u64 = 20;

    pub const MAX_HISTORY_LIMIT: u64 = 1000;
}

pub const NO_RAW_PAYLOAD: &str = "No raw HTML available";
