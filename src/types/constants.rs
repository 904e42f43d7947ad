//! Common constants for gateway fields, protocol defaults and hosts

/// Prefix carried by every signed gateway parameter
pub const SIGNED_PREFIX: &str = "vpc_";

/// Gateway parameter names
pub mod fields {
    /// Reserved key holding the signature itself
    pub const SECURE_HASH: &str = "vpc_SecureHash";
    /// Protocol version
    pub const VERSION: &str = "vpc_Version";
    /// Currency code
    pub const CURRENCY: &str = "vpc_Currency";
    /// Gateway command
    pub const COMMAND: &str = "vpc_Command";
    /// Merchant access code
    pub const ACCESS_CODE: &str = "vpc_AccessCode";
    /// Merchant id
    pub const MERCHANT: &str = "vpc_Merchant";
    /// Landing page locale
    pub const LOCALE: &str = "vpc_Locale";
    /// Merchant return URL
    pub const RETURN_URL: &str = "vpc_ReturnURL";
    /// Merchant transaction reference
    pub const MERCH_TXN_REF: &str = "vpc_MerchTxnRef";
    /// Order description
    pub const ORDER_INFO: &str = "vpc_OrderInfo";
    /// Amount in minor units
    pub const AMOUNT: &str = "vpc_Amount";
    /// Ticket / session identifier
    pub const TICKET_NO: &str = "vpc_TicketNo";
    /// Transaction response code
    pub const TXN_RESPONSE_CODE: &str = "vpc_TxnResponseCode";
    /// Status query user
    pub const USER: &str = "vpc_User";
    /// Status query password
    pub const PASSWORD: &str = "vpc_Password";
    /// Unsigned landing page title
    pub const TITLE: &str = "Title";
    /// Unsigned "pay again" link
    pub const AGAIN_LINK: &str = "AgainLink";
}

/// Protocol defaults sent with every checkout
pub mod defaults {
    /// Checkout protocol version
    pub const VERSION: u32 = 2;
    /// Only VND is accepted by the gateway
    pub const CURRENCY: &str = "VND";
    /// Checkout command
    pub const COMMAND: &str = "pay";
    /// Landing page locale
    pub const LOCALE: &str = "vn";
    /// Status query command
    pub const QUERY_COMMAND: &str = "queryDR";
    /// Status query protocol version
    pub const QUERY_VERSION: &str = "1";
    /// Multiplier between major units and the wire amount
    pub const MINOR_UNIT_FACTOR: u64 = 100;
}

/// Checkout field limits imposed by the gateway
pub mod limits {
    /// Largest accepted amount, in major units
    pub const MAX_AMOUNT: u64 = 9_999_999_999;
    /// Maximum order description length
    pub const ORDER_INFO_MAX: usize = 34;
    /// Maximum merchant transaction reference length
    pub const MERCH_TXN_REF_MAX: usize = 40;
    /// Maximum ticket number length
    pub const TICKET_NO_MAX: usize = 15;
    /// Maximum landing page title length
    pub const TITLE_MAX: usize = 64;
    /// Maximum "pay again" link length
    pub const AGAIN_LINK_MAX: usize = 64;
    /// Maximum return URL length
    pub const RETURN_URL_MAX: usize = 128;
}

/// Sandbox gateway settings
pub mod sandbox {
    /// Sandbox gateway host
    pub const HOST: &str = "mtf.onepay.vn";

    /// Domestic card gateway
    pub mod domestic {
        /// Checkout path
        pub const CHECKOUT_PATH: &str = "onecomm-pay/vpc.op";
        /// Status query path
        pub const QUERY_DR_PATH: &str = "onecomm-pay/Vpcdps.op";
        /// Test merchant id
        pub const MERCHANT: &str = "ONEPAY";
        /// Test access code
        pub const ACCESS_CODE: &str = "D67342C2";
        /// Test shared secret
        pub const SECURE_SECRET: &str = "A3EFDFABA8653DF2342E8DAC29B51AF0";
    }

    /// International card gateway
    pub mod international {
        /// Checkout path
        pub const CHECKOUT_PATH: &str = "vpcpay/vpcpay.op";
        /// Status query path
        pub const QUERY_DR_PATH: &str = "vpcpay/Vpcdps.op";
        /// Test merchant id
        pub const MERCHANT: &str = "TESTONEPAY";
        /// Test access code
        pub const ACCESS_CODE: &str = "6BEB2546";
        /// Test shared secret
        pub const SECURE_SECRET: &str = "6D0870CDE5F24F34F3915FB0045120DB";
    }
}

/// Check whether a key takes part in signing
pub fn is_signed_key(key: &str) -> bool {
    key.starts_with(SIGNED_PREFIX) && key != fields::SECURE_HASH
}
