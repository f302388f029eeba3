use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "th")]
    Thai,
    #[serde(rename = "en")]
    English,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "th" | "thai" => Ok(Locale::Thai),
            "en" | "english" => Ok(Locale::English),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

/// Every fixed user-facing string the client produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    // Backend failure classes
    pub network: &'static str,
    pub invalid_credentials: &'static str,
    pub forbidden: &'static str,
    pub not_found: &'static str,
    pub invalid_input: &'static str,
    pub server_error: &'static str,

    // Per-operation fallbacks
    pub login_failed: &'static str,
    pub register_failed: &'static str,
    pub forgot_password_failed: &'static str,
    pub reset_password_failed: &'static str,
    pub update_profile_failed: &'static str,
    pub check_auth_failed: &'static str,
    pub logout_failed: &'static str,

    // Local preconditions
    pub missing_credentials: &'static str,
    pub missing_registration_fields: &'static str,
    pub password_mismatch: &'static str,
    pub missing_email: &'static str,
    pub missing_new_password: &'static str,

    // Form fields
    pub username_or_email_required: &'static str,
    pub username_required: &'static str,
    pub username_too_short: &'static str,
    pub email_required: &'static str,
    pub email_invalid: &'static str,
    pub password_required: &'static str,
    pub password_too_short: &'static str,
    pub confirm_password_required: &'static str,
    pub confirm_password_mismatch: &'static str,
    pub phone_required: &'static str,
    pub pos_type_required: &'static str,

    // Packages and stores
    pub packages_load_failed: &'static str,
    pub subscribe_failed: &'static str,
    pub dashboard_load_failed: &'static str,
    pub store_toggle_failed: &'static str,
}

pub const THAI: Messages = Messages {
    network: "ไม่สามารถเชื่อมต่อกับเซิร์ฟเวอร์ได้ กรุณาตรวจสอบการเชื่อมต่ออินเทอร์เน็ต",
    invalid_credentials: "ชื่อผู้ใช้หรือรหัสผ่านไม่ถูกต้อง",
    forbidden: "คุณไม่มีสิทธิ์เข้าถึงระบบนี้",
    not_found: "ไม่พบข้อมูลที่ต้องการ",
    invalid_input: "ข้อมูลที่กรอกไม่ถูกต้อง",
    server_error: "เกิดข้อผิดพลาดของเซิร์ฟเวอร์ กรุณาลองใหม่อีกครั้ง",

    login_failed: "เกิดข้อผิดพลาดในการเข้าสู่ระบบ",
    register_failed: "เกิดข้อผิดพลาดในการสมัครสมาชิก",
    forgot_password_failed: "เกิดข้อผิดพลาดในการส่งลิงก์รีเซ็ตรหัสผ่าน",
    reset_password_failed: "เกิดข้อผิดพลาดในการรีเซ็ตรหัสผ่าน",
    update_profile_failed: "เกิดข้อผิดพลาดในการอัปเดตโปรไฟล์",
    check_auth_failed: "ไม่สามารถตรวจสอบการเข้าสู่ระบบได้",
    logout_failed: "เกิดข้อผิดพลาดในการออกจากระบบ",

    missing_credentials: "กรุณากรอกชื่อผู้ใช้และรหัสผ่าน",
    missing_registration_fields: "กรุณากรอกข้อมูลให้ครบถ้วน",
    password_mismatch: "รหัสผ่านและการยืนยันรหัสผ่านไม่ตรงกัน",
    missing_email: "กรุณากรอกอีเมล",
    missing_new_password: "กรุณากรอกรหัสผ่านใหม่และยืนยันรหัสผ่าน",

    username_or_email_required: "กรุณากรอกชื่อผู้ใช้หรืออีเมล",
    username_required: "กรุณากรอกชื่อผู้ใช้",
    username_too_short: "ชื่อผู้ใช้ต้องมีอย่างน้อย 3 ตัวอักษร",
    email_required: "กรุณากรอกอีเมล",
    email_invalid: "รูปแบบอีเมลไม่ถูกต้อง",
    password_required: "กรุณากรอกรหัสผ่าน",
    password_too_short: "รหัสผ่านต้องมีอย่างน้อย 6 ตัวอักษร",
    confirm_password_required: "กรุณายืนยันรหัสผ่าน",
    confirm_password_mismatch: "รหัสผ่านไม่ตรงกัน",
    phone_required: "กรุณากรอกเบอร์โทรศัพท์",
    pos_type_required: "กรุณาเลือกประเภทร้าน",

    packages_load_failed: "ไม่สามารถโหลดข้อมูลแพ็กเกจได้",
    subscribe_failed: "เกิดข้อผิดพลาดในการสมัครแพ็กเกจ",
    dashboard_load_failed: "ไม่สามารถโหลดข้อมูลได้",
    store_toggle_failed: "ไม่สามารถเปลี่ยนสถานะร้านได้",
};

pub const ENGLISH: Messages = Messages {
    network: "Cannot connect to the server. Please check your internet connection.",
    invalid_credentials: "Invalid username or password.",
    forbidden: "You do not have permission to access this system.",
    not_found: "The requested data was not found.",
    invalid_input: "The submitted data is invalid.",
    server_error: "A server error occurred. Please try again.",

    login_failed: "Login failed.",
    register_failed: "Registration failed.",
    forgot_password_failed: "Could not send the password reset link.",
    reset_password_failed: "Could not reset the password.",
    update_profile_failed: "Could not update the profile.",
    check_auth_failed: "Could not verify the login state.",
    logout_failed: "Logout failed.",

    missing_credentials: "Please enter your username and password.",
    missing_registration_fields: "Please fill in all required fields.",
    password_mismatch: "Password and confirmation do not match.",
    missing_email: "Please enter your email.",
    missing_new_password: "Please enter and confirm the new password.",

    username_or_email_required: "Please enter a username or email.",
    username_required: "Please enter a username.",
    username_too_short: "Username must be at least 3 characters.",
    email_required: "Please enter an email.",
    email_invalid: "Invalid email format.",
    password_required: "Please enter a password.",
    password_too_short: "Password must be at least 6 characters.",
    confirm_password_required: "Please confirm the password.",
    confirm_password_mismatch: "Passwords do not match.",
    phone_required: "Please enter a phone number.",
    pos_type_required: "Please choose a shop type.",

    packages_load_failed: "Could not load packages.",
    subscribe_failed: "Could not subscribe to the package.",
    dashboard_load_failed: "Could not load data.",
    store_toggle_failed: "Could not change the store status.",
};

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::Thai => &THAI,
            Locale::English => &ENGLISH,
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        THAI
    }
}
