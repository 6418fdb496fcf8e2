pub mod excuse;

pub use excuse::ExcuseService;
