mod id;
mod order;
mod types;
mod validation;

pub use id::{coerce_id, record_id, ID_NOT_A_NUMBER};
pub use order::{array_index, echo_value, ordered_keys};
pub use types::{Dog, DogPatch, NewDog};
pub use validation::{
    field_type_errors, is_recognized_key, unknown_key_errors, validate_new_dog,
    validate_patch_keys, ValidationErrors, RECOGNIZED_KEYS,
};
