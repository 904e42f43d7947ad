//! Gateway response codes and their bilingual messages
//!
//! The table is a compile-time constant; it is never mutated at runtime and can be read
//! from any thread without synchronization.

use serde::Serialize;

/// A message in the two locales the gateway supports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LocalizedMessage {
    /// Vietnamese text
    pub vn: &'static str,
    /// English text
    pub en: &'static str,
}

impl LocalizedMessage {
    const fn new(vn: &'static str, en: &'static str) -> Self {
        Self { vn, en }
    }

    /// Pick the text for a gateway locale (`vn` or anything else for English)
    pub fn for_locale(&self, locale: &str) -> &'static str {
        if locale.eq_ignore_ascii_case("vn") {
            self.vn
        } else {
            self.en
        }
    }
}

/// Code reported for a successful transaction
pub const APPROVED: &str = "0";

/// Returned for codes absent from the table
pub const UNRECOGNIZED: LocalizedMessage =
    LocalizedMessage::new("Mã lỗi không xác định", "Unrecognized response code");

static ERROR_CODES: &[(&str, LocalizedMessage)] = &[
    (APPROVED, LocalizedMessage::new("Giao dịch thành công", "Approved")),
    (
        "1",
        LocalizedMessage::new(
            "Giao dịch không thành công. Ngân hàng phát hành thẻ từ chối cấp phép cho giao dịch. Vui lòng liên hệ ngân hàng theo số điện thoại sau mặt thẻ để biết chính xác nguyên nhân Ngân hàng từ chối.",
            "The transaction is unsuccessful. This transaction has been declined by issuer bank. Please contact your bank for further clarification.",
        ),
    ),
    ("3", LocalizedMessage::new("Mã đơn vị không tồn tại", "Merchant not exist")),
    ("4", LocalizedMessage::new("Không đúng access code", "Invalid access code")),
    ("5", LocalizedMessage::new("Số tiền không hợp lệ", "Invalid amount")),
    ("6", LocalizedMessage::new("Mã tiền tệ không tồn tại", "Invalid currency code")),
    ("7", LocalizedMessage::new("Lỗi không xác định", "Unspecified Failure")),
    ("8", LocalizedMessage::new("Số thẻ không đúng", "Invalid card Number")),
    ("9", LocalizedMessage::new("Tên chủ thẻ không đúng", "Invalid card name")),
    ("10", LocalizedMessage::new("Thẻ hết hạn/Thẻ bị khóa", "Expired Card")),
    (
        "11",
        LocalizedMessage::new(
            "Thẻ chưa đăng ký sử dụng dịch vụ",
            "Card Not Registed Service(internet banking)",
        ),
    ),
    ("12", LocalizedMessage::new("Ngày phát hành/Hết hạn không đúng", "Invalid card date")),
    ("13", LocalizedMessage::new("Vượt quá hạn mức thanh toán", "Exist Amount")),
    ("21", LocalizedMessage::new("Số tiền không đủ để thanh toán", "Insufficient fund")),
    ("22", LocalizedMessage::new("Thông tin tài khoản không đúng", "Invalid Account")),
    ("23", LocalizedMessage::new("Tài khoản bị khóa", "Account Locked")),
    ("24", LocalizedMessage::new("Thông tin thẻ không đúng", "Invalid Card Info")),
    ("25", LocalizedMessage::new("OTP không đúng", "Invalid OTP")),
    ("99", LocalizedMessage::new("Người sử dụng hủy giao dịch", "User cancel")),
    ("253", LocalizedMessage::new("Quá thời gian thanh toán", "Transaction timeout")),
];

/// Look up a response code exactly as sent on the wire
pub fn lookup(code: &str) -> Option<LocalizedMessage> {
    ERROR_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| *message)
}

/// Look up a response code, falling back to [`UNRECOGNIZED`]
pub fn message_for(code: &str) -> LocalizedMessage {
    lookup(code).unwrap_or(UNRECOGNIZED)
}

/// All known response codes
pub fn known_codes() -> impl Iterator<Item = &'static str> {
    ERROR_CODES.iter().map(|(code, _)| *code)
}
