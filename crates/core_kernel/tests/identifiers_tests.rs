//! Unit tests for identifiers

use core_kernel::{AccountId, BillId, MinterId};
use uuid::Uuid;

mod account_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(AccountId::new(), AccountId::new());
    }

    #[test]
    fn test_from_uuid_round_trips() {
        let uuid = Uuid::new_v4();
        let id = AccountId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
        let back: Uuid = id.into();
        assert_eq!(back, uuid);
    }

    #[test]
    fn test_parse_without_prefix() {
        let uuid = Uuid::new_v4();
        let id: AccountId = uuid.to_string().parse().unwrap();
        assert_eq!(id, AccountId::from(uuid));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("ACC-not-a-uuid".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(AccountId::prefix(), "ACC");
        assert_eq!(MinterId::prefix(), "MNT");
        assert_eq!(BillId::prefix(), "BILL");
    }
}

mod bill_id_tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(BillId::new(12).to_string(), "BILL-12");
    }

    #[test]
    fn test_ordering_follows_sequence() {
        assert!(BillId::new(1) < BillId::new(2));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&BillId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
