//! Closed enumerations used by request and response payloads.
//!
//! Every enum serializes to its exact wire literal and parses back with
//! [`FromStr`]. Anything outside the closed set is rejected with
//! [`UnknownVariant`], both when parsing strings and when decoding JSON.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a string is not one of an enum's wire literals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    /// The name of the enumeration, e.g. `currency`.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the wire literal for this value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

closed_enum! {
    /// ISO 4217 currency codes accepted by Wafeq.
    pub enum Currency as "currency" {
        Aed => "AED",
        Sar => "SAR",
        Usd => "USD",
        Eur => "EUR",
        Cad => "CAD",
        Afn => "AFN",
        All => "ALL",
        Amd => "AMD",
        Ars => "ARS",
        Aud => "AUD",
        Azn => "AZN",
        Bam => "BAM",
        Bdt => "BDT",
        Bgn => "BGN",
        Bhd => "BHD",
        Bif => "BIF",
        Bnd => "BND",
        Bob => "BOB",
        Brl => "BRL",
        Bwp => "BWP",
        Byn => "BYN",
        Bzd => "BZD",
        Cdf => "CDF",
        Chf => "CHF",
        Clp => "CLP",
        Cny => "CNY",
        Cop => "COP",
        Crc => "CRC",
        Cve => "CVE",
        Czk => "CZK",
        Djf => "DJF",
        Dkk => "DKK",
        Dop => "DOP",
        Dzd => "DZD",
        Egp => "EGP",
        Ern => "ERN",
        Etb => "ETB",
        Gbp => "GBP",
        Gel => "GEL",
        Ghs => "GHS",
        Gnf => "GNF",
        Gtq => "GTQ",
        Hkd => "HKD",
        Hnl => "HNL",
        Hrk => "HRK",
        Huf => "HUF",
        Idr => "IDR",
        Ils => "ILS",
        Inr => "INR",
        Iqd => "IQD",
        Irr => "IRR",
        Isk => "ISK",
        Jmd => "JMD",
        Jod => "JOD",
        Jpy => "JPY",
        Kes => "KES",
        Khr => "KHR",
        Kmf => "KMF",
        Krw => "KRW",
        Kwd => "KWD",
        Kzt => "KZT",
        Lbp => "LBP",
        Lkr => "LKR",
        Lyd => "LYD",
        Mad => "MAD",
        Mdl => "MDL",
        Mga => "MGA",
        Mkd => "MKD",
        Mmk => "MMK",
        Mop => "MOP",
        Mur => "MUR",
        Mxn => "MXN",
        Myr => "MYR",
        Mzn => "MZN",
        Nad => "NAD",
        Ngn => "NGN",
        Nio => "NIO",
        Nok => "NOK",
        Npr => "NPR",
        Nzd => "NZD",
        Omr => "OMR",
        Pab => "PAB",
        Pen => "PEN",
        Php => "PHP",
        Pkr => "PKR",
        Pln => "PLN",
        Pyg => "PYG",
        Qar => "QAR",
        Ron => "RON",
        Rsd => "RSD",
        Rub => "RUB",
        Rwf => "RWF",
        Sdg => "SDG",
        Sek => "SEK",
        Sgd => "SGD",
        Sos => "SOS",
        Syp => "SYP",
        Thb => "THB",
        Tnd => "TND",
        Top => "TOP",
        Try => "TRY",
        Ttd => "TTD",
        Twd => "TWD",
        Tzs => "TZS",
        Uah => "UAH",
        Ugx => "UGX",
        Uyu => "UYU",
        Uzs => "UZS",
        Ves => "VES",
        Vnd => "VND",
        Xaf => "XAF",
        Xof => "XOF",
        Yer => "YER",
        Zar => "ZAR",
        Zmw => "ZMW",
    }
}

closed_enum! {
    /// Document language.
    pub enum Language as "language" {
        /// Arabic.
        Ar => "ar",
        /// English.
        En => "en",
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::En
    }
}

closed_enum! {
    /// Place of supply for UAE organizations.
    pub enum PlaceOfSupply as "place of supply" {
        AbuDhabi => "ABU_DHABI",
        Ajman => "AJMAN",
        Dubai => "DUBAI",
        Fujairah => "FUJAIRAH",
        RasAlKhaimah => "RAS_AL_KHAIMAH",
        Sharjah => "SHARJAH",
        UmmAlQuwain => "UMM_AL_QUWAIN",
        OutsideUae => "OUTSIDE_UAE",
    }
}

closed_enum! {
    /// Status of an invoice. New invoices default to `DRAFT` server-side.
    pub enum InvoiceStatus as "invoice status" {
        Draft => "DRAFT",
        Sent => "SENT",
    }
}

closed_enum! {
    /// Status of a bill. New bills default to `DRAFT` server-side.
    pub enum BillStatus as "bill status" {
        Draft => "DRAFT",
        Authorized => "AUTHORIZED",
        Paid => "PAID",
    }
}

closed_enum! {
    /// Whether line amounts include or exclude tax.
    pub enum TaxAmountType as "tax amount type" {
        /// Prices include tax.
        TaxInclusive => "TAX_INCLUSIVE",
        /// Prices exclude tax.
        TaxExclusive => "TAX_EXCLUSIVE",
    }
}

closed_enum! {
    /// Delivery medium for a bulk-send channel.
    pub enum Medium as "delivery medium" {
        Email => "Email",
    }
}

closed_enum! {
    /// How a bulk-send line item discount is expressed.
    pub enum DiscountType as "discount type" {
        /// `value` is a percentage.
        Percent => "%",
        /// `value` is an absolute amount.
        Amount => "amount",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_round_trips_through_wire_literal() {
        assert_eq!(Currency::Sar.as_str(), "SAR");
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(serde_json::to_value(Currency::Aed).unwrap(), "AED");
        let parsed: Currency = serde_json::from_value(serde_json::json!("ZMW")).unwrap();
        assert_eq!(parsed, Currency::Zmw);
    }

    #[test]
    fn test_currency_list_is_closed() {
        assert_eq!(Currency::ALL.len(), 115);
        let err = "XYZ".parse::<Currency>().unwrap_err();
        assert_eq!(err.kind, "currency");
        assert_eq!(err.value, "XYZ");
        assert_eq!(err.to_string(), "unknown currency `XYZ`");
    }

    #[test]
    fn test_parsing_is_case_sensitive() {
        assert!("usd".parse::<Currency>().is_err());
        assert!("EN".parse::<Language>().is_err());
        assert!("email".parse::<Medium>().is_err());
    }

    #[test]
    fn test_unknown_literal_fails_to_deserialize() {
        let result: Result<TaxAmountType, _> =
            serde_json::from_value(serde_json::json!("TAX_FREE"));
        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("unknown tax amount type"));
    }

    #[test]
    fn test_discount_type_literals() {
        assert_eq!(DiscountType::Percent.to_string(), "%");
        assert_eq!("amount".parse::<DiscountType>().unwrap(), DiscountType::Amount);
    }

    #[test]
    fn test_place_of_supply_literals() {
        assert_eq!(PlaceOfSupply::ALL.len(), 8);
        assert_eq!(
            "RAS_AL_KHAIMAH".parse::<PlaceOfSupply>().unwrap(),
            PlaceOfSupply::RasAlKhaimah
        );
    }

    #[test]
    fn test_language_defaults_to_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_every_variant_parses_from_its_own_literal() {
        for currency in Currency::ALL {
            assert_eq!(currency.as_str().parse::<Currency>().unwrap(), *currency);
        }
        for status in BillStatus::ALL {
            assert_eq!(status.as_str().parse::<BillStatus>().unwrap(), *status);
        }
    }
}
