use borsh::BorshSerialize;


pub fn borsh_serialize<T: BorshSerialize>(value: &T) -> Vec<u8> {
    borsh::to_vec(value).unwrap()
}
