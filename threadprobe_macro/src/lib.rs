use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Item, ReturnType};
use threadprobe_ffi::{ENTRY_ATTACH, ENTRY_DETACH, ENTRY_TEST, ENTRY_VERSION};

/// Exports the annotated function as the module's attach entry point.
///
/// The function may return `bool` to report attach success itself; a unit
/// function reports success unconditionally. Also exports the version entry
/// point so a host can check compatibility before attaching.
#[proc_macro_attribute]
pub fn threadprobe_entry_attach(_attr: TokenStream, token_stream: TokenStream) -> TokenStream {
	let input: Item = syn::parse_macro_input!(token_stream);
	if let Item::Fn(input_function) = &input {
		let input_function_name = &input_function.sig.ident;
		let entry_name = format_ident!("{}", ENTRY_ATTACH);
		let version_name = format_ident!("{}", ENTRY_VERSION);

		let forward = if let ReturnType::Default = input_function.sig.output {
			quote! {
				#input_function_name();
				true
			}
		} else {
			quote! { #input_function_name() }
		};

		let expanded = quote! {
			#input

			#[cfg(not(feature = "threadprobe_erase"))]
			#[no_mangle]
			pub extern "C" fn #entry_name() -> bool {
				#forward
			}

			#[cfg(not(feature = "threadprobe_erase"))]
			#[no_mangle]
			pub extern "C" fn #version_name() -> u32 {
				threadprobe::internal::API_VERSION
			}
		};

		TokenStream::from(expanded)
	} else {
		panic!("#[threadprobe_entry_attach] is intended on a function");
	}
}

/// Exports the annotated function as the module's detach entry point.
#[proc_macro_attribute]
pub fn threadprobe_entry_detach(_attr: TokenStream, token_stream: TokenStream) -> TokenStream {
	let input: Item = syn::parse_macro_input!(token_stream);
	if let Item::Fn(input_function) = &input {
		let input_function_name = &input_function.sig.ident;
		let entry_name = format_ident!("{}", ENTRY_DETACH);

		let expanded = quote! {
			#input

			#[cfg(not(feature = "threadprobe_erase"))]
			#[no_mangle]
			pub extern "C" fn #entry_name() {
				#input_function_name();
			}
		};

		TokenStream::from(expanded)
	} else {
		panic!("#[threadprobe_entry_detach] is intended on a function");
	}
}

/// Exports the annotated function as the module's on-demand test entry point.
#[proc_macro_attribute]
pub fn threadprobe_entry_test(_attr: TokenStream, token_stream: TokenStream) -> TokenStream {
	let input: Item = syn::parse_macro_input!(token_stream);
	if let Item::Fn(input_function) = &input {
		let input_function_name = &input_function.sig.ident;
		let entry_name = format_ident!("{}", ENTRY_TEST);

		let expanded = quote! {
			#input

			#[cfg(not(feature = "threadprobe_erase"))]
			#[no_mangle]
			pub extern "C" fn #entry_name() {
				#input_function_name();
			}
		};

		TokenStream::from(expanded)
	} else {
		panic!("#[threadprobe_entry_test] is intended on a function");
	}
}
